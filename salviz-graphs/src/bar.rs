//! Categorical bar chart renderer (horizontal and vertical)

use crate::renderer::{format_thousands, parse_color, ChartRenderer};
use crate::{ChartConfig, Palette};
use async_trait::async_trait;
use plotters::prelude::*;
use salviz_common::{Result, SalvizError};
use std::path::Path;
use tracing::info;

/// Bar outlines share one edge color across every bar chart
const BAR_EDGE: RGBColor = BLACK;

/// Bar direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrientation {
    /// Categories on the y axis, values growing to the right
    Horizontal,
    /// Categories on the x axis, values growing upward
    Vertical,
}

/// Bar chart over an ordered, labeled aggregate result
///
/// Entries are drawn in the order given: index 0 sits at the bottom of
/// a horizontal chart and at the left of a vertical one.
#[derive(Debug)]
pub struct BarChart {
    pub entries: Vec<(String, f64)>,
    pub orientation: BarOrientation,
    /// Multiplier applied to the max value for axis headroom
    pub axis_padding: f64,
}

impl BarChart {
    pub fn new(entries: Vec<(String, f64)>, orientation: BarOrientation) -> Self {
        Self {
            entries,
            orientation,
            axis_padding: 1.1,
        }
    }

    pub fn with_axis_padding(mut self, padding: f64) -> Self {
        self.axis_padding = padding;
        self
    }

    fn max_value(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, v)| *v)
            .fold(0.0, f64::max)
            .max(1.0)
            * self.axis_padding
    }

    fn fill_color(&self, palette: &Palette) -> RGBColor {
        match palette {
            Palette::Solid(c) => parse_color(c),
            Palette::Custom(colors) => colors
                .first()
                .map(|c| parse_color(c))
                .unwrap_or(RGBColor(31, 119, 180)),
            Palette::Viridis => RGBColor(31, 119, 180),
        }
    }
}

#[async_trait]
impl ChartRenderer for BarChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.entries.is_empty() {
            return Err(SalvizError::chart("No bar chart entries to render"));
        }

        let labels: Vec<String> = self.entries.iter().map(|(k, _)| k.clone()).collect();
        let values: Vec<f64> = self.entries.iter().map(|(_, v)| *v).collect();
        let n = self.entries.len();
        let max_value = self.max_value();
        let fill = self.fill_color(&config.style.palette);

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );

        match self.orientation {
            BarOrientation::Horizontal => {
                let mut chart = ChartBuilder::on(&root)
                    .caption(&config.title, title_font)
                    .margin(config.style.margins.top)
                    .x_label_area_size(config.style.margins.bottom)
                    .y_label_area_size(config.style.margins.left)
                    .build_cartesian_2d(0f64..max_value, (0usize..n).into_segmented())?;

                chart
                    .configure_mesh()
                    .disable_mesh()
                    .x_desc(config.x_label.as_deref().unwrap_or(""))
                    .y_desc(config.y_label.as_deref().unwrap_or(""))
                    .axis_desc_style((
                        config.style.axis_font.family.as_str(),
                        config.style.axis_font.size,
                    ))
                    .label_style((
                        config.style.label_font.family.as_str(),
                        config.style.label_font.size,
                    ))
                    .x_label_formatter(&|x| format_thousands(*x))
                    .y_label_formatter(&|y| match y {
                        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                            labels.get(*i).cloned().unwrap_or_default()
                        }
                        SegmentValue::Last => String::new(),
                    })
                    .y_labels(n)
                    .draw()?;

                chart.draw_series(
                    Histogram::horizontal(&chart)
                        .style(fill.mix(0.85).filled())
                        .margin(6)
                        .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
                )?;
                // Black bar edges over the fill
                chart.draw_series(
                    Histogram::horizontal(&chart)
                        .style(BAR_EDGE.stroke_width(1))
                        .margin(6)
                        .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
                )?;
            }
            BarOrientation::Vertical => {
                let mut chart = ChartBuilder::on(&root)
                    .caption(&config.title, title_font)
                    .margin(config.style.margins.top)
                    .x_label_area_size(config.style.margins.bottom)
                    .y_label_area_size(config.style.margins.left)
                    .build_cartesian_2d((0usize..n).into_segmented(), 0f64..max_value)?;

                chart
                    .configure_mesh()
                    .disable_mesh()
                    .x_desc(config.x_label.as_deref().unwrap_or(""))
                    .y_desc(config.y_label.as_deref().unwrap_or(""))
                    .axis_desc_style((
                        config.style.axis_font.family.as_str(),
                        config.style.axis_font.size,
                    ))
                    .label_style((
                        config.style.label_font.family.as_str(),
                        config.style.label_font.size,
                    ))
                    .y_label_formatter(&|y| format_thousands(*y))
                    .x_label_formatter(&|x| match x {
                        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                            labels.get(*i).cloned().unwrap_or_default()
                        }
                        SegmentValue::Last => String::new(),
                    })
                    .x_labels(n)
                    .draw()?;

                chart.draw_series(
                    Histogram::vertical(&chart)
                        .style(fill.mix(0.85).filled())
                        .margin(6)
                        .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
                )?;
                chart.draw_series(
                    Histogram::vertical(&chart)
                        .style(BAR_EDGE.stroke_width(1))
                        .margin(6)
                        .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
                )?;
            }
        }

        root.present()?;
        info!(path = %path.display(), bars = n, "Rendered bar chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartKind;
    use tempfile::TempDir;

    fn entries() -> Vec<(String, f64)> {
        vec![
            ("Germany".to_string(), 150_000.0),
            ("United States".to_string(), 140_000.0),
            ("Canada".to_string(), 110_000.0),
        ]
    }

    #[test]
    fn test_bar_edges_are_black() {
        assert_eq!(BAR_EDGE, RGBColor(0, 0, 0));
    }

    #[test]
    fn test_max_value_includes_padding() {
        let chart = BarChart::new(entries(), BarOrientation::Horizontal).with_axis_padding(1.15);
        assert!((chart.max_value() - 150_000.0 * 1.15).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_render_horizontal_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("horizontal.png");

        let chart = BarChart::new(entries(), BarOrientation::Horizontal);
        let config = ChartConfig::new(
            ChartKind::HorizontalBar,
            "Highest Paying Countries for Data Science Jobs",
            Some("Average Salary (USD)"),
            Some("Country"),
        );

        let result = chart.render_to_file(&config, &test_path).await;
        assert!(result.is_ok(), "Failed to render chart: {:?}", result.err());
        assert!(test_path.exists());

        let metadata = std::fs::metadata(&test_path).expect("Failed to read file metadata");
        assert!(metadata.len() > 1000, "Generated chart file is too small");
    }

    #[tokio::test]
    async fn test_render_vertical_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("vertical.png");

        let chart = BarChart::new(entries(), BarOrientation::Vertical);
        let config = ChartConfig::new(
            ChartKind::VerticalBar,
            "Most Common Data Science Jobs",
            Some("Job Title"),
            Some("Count"),
        );

        assert!(chart.render_to_file(&config, &test_path).await.is_ok());
        assert!(test_path.exists());
    }

    #[tokio::test]
    async fn test_render_empty_data_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("empty.png");

        let chart = BarChart::new(Vec::new(), BarOrientation::Vertical);
        let config = ChartConfig::default();

        assert!(chart.render_to_file(&config, &test_path).await.is_err());
    }
}

//! Salary box plot grouped by experience level

use crate::renderer::{format_thousands, ChartRenderer};
use crate::ChartConfig;
use async_trait::async_trait;
use plotters::prelude::*;
use salviz_common::{Result, SalvizError};
use std::path::Path;
use tracing::info;

/// One labeled group of raw salary samples
#[derive(Debug, Clone)]
pub struct BoxGroup {
    pub label: String,
    pub values: Vec<f64>,
}

impl BoxGroup {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Box-and-whisker chart over ordered groups
///
/// Groups render left to right in the order given; whiskers span the
/// quartile fences without marking individual outliers.
#[derive(Debug)]
pub struct BoxPlotChart {
    pub groups: Vec<BoxGroup>,
}

impl BoxPlotChart {
    pub fn new(groups: Vec<BoxGroup>) -> Self {
        Self { groups }
    }

    fn value_bounds(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for group in &self.groups {
            let quartiles = Quartiles::new(&group.values);
            let values = quartiles.values();
            min = min.min(values[0]);
            max = max.max(values[4]);
        }
        (min, max)
    }
}

#[async_trait]
impl ChartRenderer for BoxPlotChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.groups.is_empty() || self.groups.iter().any(|g| g.values.is_empty()) {
            return Err(SalvizError::chart("Every box plot group needs samples"));
        }

        let labels: Vec<String> = self.groups.iter().map(|g| g.label.clone()).collect();
        let n = self.groups.len();
        let (value_min, value_max) = self.value_bounds();
        let span = (value_max - value_min).max(1.0);
        let colors = self.get_colors(&config.style.palette);

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                &config.title,
                (
                    config.style.title_font.family.as_str(),
                    config.style.title_font.size,
                ),
            )
            .margin(config.style.margins.top)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(
                (0usize..n).into_segmented(),
                (value_min - span * 0.05)..(value_max + span * 0.05),
            )?;

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
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                    labels.get(*i).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .x_labels(n)
            .y_label_formatter(&|y| format_thousands(*y as f64))
            .draw()?;

        let box_width = (config.width / (n as u32 * 3)).max(20);
        for (i, group) in self.groups.iter().enumerate() {
            let quartiles = Quartiles::new(&group.values);
            let color = colors
                .get(i % colors.len().max(1))
                .copied()
                .unwrap_or(RGBColor(141, 160, 203));

            chart.draw_series(std::iter::once(
                Boxplot::new_vertical(SegmentValue::CenterOf(i), &quartiles)
                    .width(box_width)
                    .whisker_width(0.5)
                    .style(color),
            ))?;
        }

        root.present()?;
        info!(path = %path.display(), groups = n, "Rendered salary box plot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChartKind, Palette};
    use tempfile::TempDir;

    fn sample_groups() -> Vec<BoxGroup> {
        vec![
            BoxGroup::new(
                "Entry-Level",
                vec![45_000.0, 55_000.0, 60_000.0, 70_000.0, 80_000.0],
            ),
            BoxGroup::new(
                "Mid-Level",
                vec![70_000.0, 85_000.0, 95_000.0, 105_000.0, 120_000.0],
            ),
            BoxGroup::new(
                "Senior-Level",
                vec![110_000.0, 130_000.0, 145_000.0, 160_000.0, 190_000.0],
            ),
            BoxGroup::new(
                "Executive-Level",
                vec![150_000.0, 180_000.0, 210_000.0, 250_000.0, 300_000.0],
            ),
        ]
    }

    #[test]
    fn test_value_bounds_cover_whiskers() {
        let chart = BoxPlotChart::new(sample_groups());
        let (min, max) = chart.value_bounds();
        assert!(min <= 45_000.0);
        assert!(max >= 250_000.0);
    }

    #[tokio::test]
    async fn test_render_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("experience.png");

        let chart = BoxPlotChart::new(sample_groups());
        let mut config = ChartConfig::new(
            ChartKind::BoxPlot,
            "Salary Distribution by Experience Level",
            Some("Experience Level"),
            Some("Salary (USD)"),
        );
        config.style.palette = Palette::Custom(vec![
            "#8DA0CB".to_string(),
            "#FC8D62".to_string(),
            "#66C2A5".to_string(),
            "#E78AC3".to_string(),
        ]);

        let result = chart.render_to_file(&config, &test_path).await;
        assert!(result.is_ok(), "Failed to render chart: {:?}", result.err());
        assert!(test_path.exists());
    }

    #[tokio::test]
    async fn test_render_empty_group_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("empty.png");

        let chart = BoxPlotChart::new(vec![BoxGroup::new("Entry-Level", Vec::new())]);
        let config = ChartConfig::default();

        assert!(chart.render_to_file(&config, &test_path).await.is_err());
    }
}

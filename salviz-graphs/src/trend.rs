//! Year-over-year salary trend lines, one series per job title

use crate::renderer::{format_thousands, ChartRenderer};
use crate::ChartConfig;
use async_trait::async_trait;
use plotters::prelude::*;
use salviz_common::{Result, SalvizError};
use std::path::Path;
use tracing::info;

/// Legend anchor; the lines climb left to right so lower right stays clear
fn legend_position() -> SeriesLabelPosition {
    SeriesLabelPosition::LowerRight
}

/// One labeled line of `(year, mean salary)` points
#[derive(Debug, Clone)]
pub struct TrendSeries {
    pub label: String,
    pub points: Vec<(i32, f64)>,
}

impl TrendSeries {
    pub fn new(label: impl Into<String>, points: Vec<(i32, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

/// Multi-series line chart over calendar years
#[derive(Debug)]
pub struct TrendChart {
    pub series: Vec<TrendSeries>,
}

impl TrendChart {
    pub fn new(series: Vec<TrendSeries>) -> Self {
        Self { series }
    }

    fn year_bounds(&self) -> (i32, i32) {
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for series in &self.series {
            for (year, _) in &series.points {
                min = min.min(*year);
                max = max.max(*year);
            }
        }
        (min, max)
    }

    fn value_bounds(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for series in &self.series {
            for (_, value) in &series.points {
                min = min.min(*value);
                max = max.max(*value);
            }
        }
        (min, max)
    }
}

#[async_trait]
impl ChartRenderer for TrendChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.series.is_empty() || self.series.iter().all(|s| s.points.is_empty()) {
            return Err(SalvizError::chart("No trend series to render"));
        }

        let (year_min, year_max) = self.year_bounds();
        let (value_min, value_max) = self.value_bounds();
        let value_span = (value_max - value_min).max(1.0);
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
                year_min..year_max.max(year_min + 1),
                (value_min - value_span * 0.05)..(value_max + value_span * 0.05),
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
            .x_labels((year_max - year_min + 1).max(2) as usize)
            .x_label_formatter(&|year| year.to_string())
            .y_label_formatter(&|value| format_thousands(*value))
            .draw()?;

        for (i, series) in self.series.iter().enumerate() {
            let color = colors
                .get(i % colors.len().max(1))
                .copied()
                .unwrap_or(RGBColor(31, 119, 180));
            let mut points = series.points.clone();
            points.sort_by_key(|(year, _)| *year);

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(3)))?
                .label(series.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });

            chart.draw_series(
                points
                    .iter()
                    .map(|point| Circle::new(*point, 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(legend_position())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((
                config.style.label_font.family.as_str(),
                config.style.label_font.size,
            ))
            .draw()?;

        root.present()?;
        info!(
            path = %path.display(),
            series = self.series.len(),
            "Rendered salary trend chart"
        );
        Ok(())
    }
}

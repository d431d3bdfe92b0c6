//! Salary distribution histogram with a median marker

use crate::aggregate::median;
use crate::renderer::{format_dollars, format_thousands, parse_color, ChartRenderer};
use crate::ChartConfig;
use async_trait::async_trait;
use plotters::prelude::*;
use salviz_common::{Result, SalvizError};
use std::path::Path;
use tracing::info;

const DEFAULT_BIN_COUNT: usize = 30;

/// Frequency histogram over raw salary values
#[derive(Debug)]
pub struct SalaryHistogram {
    pub values: Vec<f64>,
    pub bins: usize,
    /// Color of the dashed vertical median marker
    pub median_color: String,
}

impl SalaryHistogram {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            bins: DEFAULT_BIN_COUNT,
            median_color: "#4169E1".to_string(),
        }
    }

    /// Equal-width bin counts over `[min, max]`
    ///
    /// Returns the bin width, the minimum edge, and one count per bin.
    /// The max value lands in the last bin rather than opening a new one.
    fn bin_counts(&self) -> (f64, f64, Vec<usize>) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = (max - min).max(f64::EPSILON);
        let width = span / self.bins as f64;

        let mut counts = vec![0usize; self.bins];
        for value in &self.values {
            let index = (((value - min) / width) as usize).min(self.bins - 1);
            counts[index] += 1;
        }
        (width, min, counts)
    }

    /// Plotted x-range: anchored at 0 regardless of the data minimum
    fn x_range(&self) -> std::ops::Range<f64> {
        let (width, min, _) = self.bin_counts();
        0.0..min + width * self.bins as f64
    }
}

#[async_trait]
impl ChartRenderer for SalaryHistogram {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.values.is_empty() {
            return Err(SalvizError::chart("No salary values to bin"));
        }

        let (width, min, counts) = self.bin_counts();
        let max_count = counts.iter().copied().max().unwrap_or(1) as f64;
        let median_value = median(&self.values);

        let fill = self
            .get_colors(&config.style.palette)
            .first()
            .copied()
            .unwrap_or(RGBColor(46, 139, 87));
        let median_stroke = parse_color(&self.median_color);

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
            .build_cartesian_2d(self.x_range(), 0f64..max_count * 1.05)?;

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
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, count)| {
            let x0 = min + width * i as f64;
            let x1 = x0 + width;
            Rectangle::new([(x0, 0.0), (x1, *count as f64)], fill.mix(0.85).filled())
        }))?;
        // Black bin edges over the fill
        chart.draw_series(counts.iter().enumerate().map(|(i, count)| {
            let x0 = min + width * i as f64;
            let x1 = x0 + width;
            Rectangle::new([(x0, 0.0), (x1, *count as f64)], BLACK.stroke_width(1))
        }))?;

        chart
            .draw_series(DashedLineSeries::new(
                vec![(median_value, 0.0), (median_value, max_count * 1.05)],
                8,
                5,
                median_stroke.stroke_width(2),
            ))?
            .label(format!("Median: {}", format_dollars(median_value)))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], median_stroke.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
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
            bins = self.bins,
            median = median_value,
            "Rendered salary histogram"
        );
        Ok(())
    }
}

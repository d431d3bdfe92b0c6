//! Chart rendering trait and shared styling helpers

use crate::{ChartConfig, Palette};
use plotters::prelude::*;
use salviz_common::Result;
use std::path::Path;

/// Trait for chart renderers
///
/// Each renderer owns its (already aggregated and labeled) data and
/// draws one artifact to the given path.
#[async_trait::async_trait]
pub trait ChartRenderer {
    /// Render the chart to a file path
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Fill the drawing area with the configured background
    fn apply_styling<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, plotters::coord::Shift>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let bg_color = parse_color(&config.style.background_color);
        root.fill(&bg_color)?;
        Ok(())
    }

    /// Resolve the palette to concrete series colors
    fn get_colors(&self, palette: &Palette) -> Vec<RGBColor> {
        match palette {
            Palette::Solid(color) => vec![parse_color(color)],
            Palette::Custom(colors) => colors.iter().map(|c| parse_color(c)).collect(),
            // Continuous palettes are sampled at render time; expose a
            // representative color for legends
            Palette::Viridis => vec![RGBColor(68, 1, 84)],
        }
    }
}

/// Parse a `#rrggbb` color string; black on parse failure
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// Format a numeric axis value with thousands separators ("140,000")
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

/// Format a dollar amount ("$140,000")
pub fn format_dollars(value: f64) -> String {
    format!("${}", format_thousands(value))
}

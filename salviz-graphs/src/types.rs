//! Chart types and shared configuration structures

use serde::{Deserialize, Serialize};

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    HorizontalBar,
    VerticalBar,
    Histogram,
    Line,
    BoxPlot,
    Choropleth,
}

/// Chart configuration shared by all renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::VerticalBar,
            title: "Chart".to_string(),
            width: 1100,
            height: 660,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Convenience constructor used by the per-chart renderers
    pub fn new(kind: ChartKind, title: &str, x_label: Option<&str>, y_label: Option<&str>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    /// Scale the pixel dimensions, used to honor the configured render scale
    pub fn scaled(mut self, scale: f64) -> Self {
        self.width = (self.width as f64 * scale).round() as u32;
        self.height = (self.height as f64 * scale).round() as u32;
        self
    }
}

/// Color palette selection for a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Palette {
    /// Single fill color for all elements (hex string)
    Solid(String),
    /// Explicit per-series colors (hex strings)
    Custom(Vec<String>),
    /// Continuous viridis-style gradient, used by the choropleth
    Viridis,
}

impl Default for Palette {
    fn default() -> Self {
        Self::Solid("#1f77b4".to_string())
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 30,
            bottom: 60,
            left: 90,
        }
    }
}

/// Styling configuration
///
/// Gridlines are disabled by default; every report chart renders without
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub palette: Palette,
    pub background_color: String,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
    pub show_grid: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            background_color: "#FFFFFF".to_string(),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 28,
            },
            axis_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 18,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
            show_grid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.width, 1100);
        assert_eq!(config.height, 660);
        assert!(!config.style.show_grid);
    }

    #[test]
    fn test_new_sets_labels() {
        let config = ChartConfig::new(
            ChartKind::HorizontalBar,
            "Test",
            Some("Average Salary (USD)"),
            Some("Country"),
        );
        assert_eq!(config.kind, ChartKind::HorizontalBar);
        assert_eq!(config.x_label.as_deref(), Some("Average Salary (USD)"));
        assert_eq!(config.y_label.as_deref(), Some("Country"));
    }

    #[test]
    fn test_scaled_dimensions() {
        let config = ChartConfig::default().scaled(2.0);
        assert_eq!(config.width, 2200);
        assert_eq!(config.height, 1320);
    }
}

//! World salary map: a tile-grid PNG and an interactive HTML document
//!
//! Country codes are resolved to ISO alpha-3 before plotting; rows whose
//! code has no ISO entry are dropped from the map rather than failing
//! the whole render.

use crate::countries;
use crate::renderer::{format_dollars, ChartRenderer};
use crate::ChartConfig;
use async_trait::async_trait;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use salviz_common::{Result, SalvizError};
use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

/// One country after ISO resolution
#[derive(Debug, Clone, PartialEq)]
pub struct CountryValue {
    pub alpha2: String,
    pub alpha3: String,
    pub name: String,
    pub value: f64,
}

/// Mean salary per company location, keyed by ISO alpha-2 code
#[derive(Debug)]
pub struct ChoroplethMap {
    pub entries: Vec<(String, f64)>,
}

impl ChoroplethMap {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Resolve entries to alpha-3 codes, dropping codes outside the registry
    pub fn resolved(&self) -> Vec<CountryValue> {
        let mut resolved = Vec::with_capacity(self.entries.len());
        for (alpha2, value) in &self.entries {
            match countries::alpha3(alpha2) {
                Some(alpha3) => resolved.push(CountryValue {
                    alpha2: alpha2.clone(),
                    alpha3: alpha3.to_string(),
                    name: countries::country_name(alpha2).into_display(),
                    value: *value,
                }),
                None => {
                    debug!(code = %alpha2, "Dropping location with no ISO country entry");
                }
            }
        }
        resolved.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .expect("salary values are finite")
                .then_with(|| a.alpha3.cmp(&b.alpha3))
        });
        resolved
    }

    /// The plotly figure embedded in the HTML document
    fn figure_json(&self, config: &ChartConfig, resolved: &[CountryValue]) -> serde_json::Value {
        let locations: Vec<&str> = resolved.iter().map(|c| c.alpha3.as_str()).collect();
        let values: Vec<f64> = resolved.iter().map(|c| c.value).collect();
        let names: Vec<&str> = resolved.iter().map(|c| c.name.as_str()).collect();

        json!({
            "data": [{
                "type": "choropleth",
                "locations": locations,
                "z": values,
                "text": names,
                "colorscale": "Viridis",
                "colorbar": { "title": "Avg Salary (USD)", "tickprefix": "$" }
            }],
            "layout": {
                "title": config.title,
                "geo": {
                    "projection": { "type": "natural earth" },
                    "showframe": false,
                    "showcoastlines": true
                },
                "width": config.width,
                "height": config.height
            }
        })
    }

    /// Write the interactive map as a standalone HTML document
    pub fn render_html(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let resolved = self.resolved();
        if resolved.is_empty() {
            return Err(SalvizError::chart("No resolvable countries to map"));
        }
        let figure = self.figure_json(config, &resolved);

        let document = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n\
             <script src=\"https://cdn.plot.ly/plotly-2.32.0.min.js\"></script>\n\
             </head>\n<body>\n<div id=\"map\"></div>\n<script>\n\
             var figure = {};\n\
             Plotly.newPlot(\"map\", figure.data, figure.layout);\n\
             </script>\n</body>\n</html>\n",
            config.title,
            serde_json::to_string(&figure)?
        );

        std::fs::write(path, document)?;
        info!(
            path = %path.display(),
            countries = resolved.len(),
            "Wrote interactive salary map"
        );
        Ok(())
    }
}

#[async_trait]
impl ChartRenderer for ChoroplethMap {
    /// Render the static map as a value-ordered tile grid
    ///
    /// Each country is one tile, shaded on the viridis scale by its mean
    /// salary, with a gradient legend strip along the bottom edge.
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let resolved = self.resolved();
        if resolved.is_empty() {
            return Err(SalvizError::chart("No resolvable countries to map"));
        }

        let value_min = resolved
            .iter()
            .map(|c| c.value)
            .fold(f64::INFINITY, f64::min);
        let value_max = resolved
            .iter()
            .map(|c| c.value)
            .fold(f64::NEG_INFINITY, f64::max);

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let width = config.width as i32;
        let height = config.height as i32;
        let title_height = 50;
        let legend_height = 60;

        root.draw(&Text::new(
            config.title.clone(),
            (width / 2 - (config.title.len() as i32 * 7), 15),
            (
                config.style.title_font.family.as_str(),
                config.style.title_font.size,
            ),
        ))?;

        // Tile grid sized to roughly square cells over the free area
        let grid_top = title_height;
        let grid_height = height - title_height - legend_height;
        let n = resolved.len();
        let aspect = width as f64 / grid_height as f64;
        let columns = ((n as f64 * aspect).sqrt().ceil() as usize).max(1);
        let rows = n.div_ceil(columns);
        let cell_w = width / columns as i32;
        let cell_h = grid_height / rows as i32;

        for (i, country) in resolved.iter().enumerate() {
            let col = (i % columns) as i32;
            let row = (i / columns) as i32;
            let x0 = col * cell_w;
            let y0 = grid_top + row * cell_h;

            let shade = ViridisRGB.get_color_normalized(country.value, value_min, value_max);
            root.draw(&Rectangle::new(
                [(x0 + 1, y0 + 1), (x0 + cell_w - 1, y0 + cell_h - 1)],
                shade.filled(),
            ))?;

            // Dark tiles get white labels
            let luminance = 0.299 * shade.0 as f64 + 0.587 * shade.1 as f64 + 0.114 * shade.2 as f64;
            let text_color = if luminance < 128.0 { WHITE } else { BLACK };
            root.draw(&Text::new(
                country.alpha3.clone(),
                (x0 + cell_w / 2 - 14, y0 + cell_h / 2 - 8),
                (
                    config.style.label_font.family.as_str(),
                    config.style.label_font.size,
                )
                    .into_font()
                    .color(&text_color),
            ))?;
        }

        // Legend: a horizontal viridis gradient with the value extremes
        let legend_top = height - legend_height + 15;
        let legend_width = width / 2;
        let legend_left = width / 4;
        for step in 0..legend_width {
            let fraction = step as f64 / legend_width as f64;
            let shade = ViridisRGB.get_color_normalized(fraction, 0.0, 1.0);
            root.draw(&Rectangle::new(
                [
                    (legend_left + step, legend_top),
                    (legend_left + step + 1, legend_top + 16),
                ],
                shade.filled(),
            ))?;
        }
        let label_font = (
            config.style.label_font.family.as_str(),
            config.style.label_font.size,
        );
        root.draw(&Text::new(
            format_dollars(value_min),
            (legend_left - 80, legend_top + 2),
            label_font,
        ))?;
        root.draw(&Text::new(
            format_dollars(value_max),
            (legend_left + legend_width + 8, legend_top + 2),
            label_font,
        ))?;

        root.present()?;
        info!(
            path = %path.display(),
            countries = n,
            "Rendered static salary map"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartKind;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<(String, f64)> {
        vec![
            ("US".to_string(), 140_000.0),
            ("DE".to_string(), 95_000.0),
            ("RU".to_string(), 60_000.0),
            ("GB".to_string(), 105_000.0),
        ]
    }

    #[test]
    fn test_resolved_sorts_by_value_descending() {
        let map = ChoroplethMap::new(sample_entries());
        let resolved = map.resolved();

        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved[0].alpha3, "USA");
        for pair in resolved.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn test_unknown_codes_are_dropped() {
        let mut entries = sample_entries();
        entries.push(("XX".to_string(), 999_999.0));
        let map = ChoroplethMap::new(entries);

        let resolved = map.resolved();
        assert_eq!(resolved.len(), 4);
        assert!(resolved.iter().all(|c| c.alpha2 != "XX"));
    }

    #[test]
    fn test_name_aliases_apply() {
        let map = ChoroplethMap::new(vec![("RU".to_string(), 60_000.0)]);
        let resolved = map.resolved();
        assert_eq!(resolved[0].name, "Russia");
        assert_eq!(resolved[0].alpha3, "RUS");
    }

    #[test]
    fn test_colorbar_has_dollar_prefix() {
        let map = ChoroplethMap::new(sample_entries());
        let config = ChartConfig::default();

        let figure = map.figure_json(&config, &map.resolved());
        let colorbar = &figure["data"][0]["colorbar"];
        assert_eq!(colorbar["tickprefix"], "$");
        assert_eq!(colorbar["title"], "Avg Salary (USD)");
    }

    #[test]
    fn test_render_html() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("map.html");

        let map = ChoroplethMap::new(sample_entries());
        let config = ChartConfig::new(
            ChartKind::Choropleth,
            "Average Data Science Salary by Country",
            None,
            None,
        );

        map.render_html(&config, &test_path)
            .expect("Failed to write HTML map");

        let html = std::fs::read_to_string(&test_path).expect("Failed to read HTML");
        assert!(html.contains("choropleth"));
        assert!(html.contains("USA"));
        assert!(html.contains("Viridis"));
        assert!(html.contains("natural earth"));
    }

    #[tokio::test]
    async fn test_render_png() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("map.png");

        let map = ChoroplethMap::new(sample_entries());
        let config = ChartConfig::new(
            ChartKind::Choropleth,
            "Average Data Science Salary by Country",
            None,
            None,
        );

        let result = map.render_to_file(&config, &test_path).await;
        assert!(result.is_ok(), "Failed to render map: {:?}", result.err());
        assert!(test_path.exists());
    }

    #[tokio::test]
    async fn test_all_unknown_codes_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("empty.png");

        let map = ChoroplethMap::new(vec![("XX".to_string(), 1.0)]);
        let config = ChartConfig::default();

        assert!(map.render_to_file(&config, &test_path).await.is_err());
    }
}

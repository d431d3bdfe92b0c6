//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input dataset settings
    pub data: DataConfig,
    /// Output artifact settings
    pub output: OutputConfig,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Input dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the salary dataset CSV file
    pub file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("data/ds_salaries.csv"),
        }
    }
}

/// Output artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives all rendered artifacts
    pub directory: PathBuf,
    /// Render scale multiplier applied to base chart dimensions
    pub scale: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            scale: 1.0,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter (e.g., "info", "debug")
    pub level: String,
    /// Optional log file path
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data.file, PathBuf::from("data/ds_salaries.csv"));
        assert_eq!(config.output.directory, PathBuf::from("output"));
        assert!((config.output.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [output]
            directory = "artifacts"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.directory, PathBuf::from("artifacts"));
        assert_eq!(config.data.file, PathBuf::from("data/ds_salaries.csv"));
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.data.file, config.data.file);
        assert_eq!(deserialized.output.directory, config.output.directory);
    }
}

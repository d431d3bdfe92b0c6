//! Configuration loading utilities

use crate::settings::AppConfig;
use crate::validation;
use salviz_common::Result as SalvizResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default configuration file name looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "salviz.toml";

/// Environment variable that overrides the configuration file path
const CONFIG_PATH_VAR: &str = "SALVIZ_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for salviz_common::SalvizError {
    fn from(err: ConfigError) -> Self {
        salviz_common::SalvizError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = toml::from_str(&content)?;

        validation::validate(&config).map_err(ConfigError::ValidationError)?;

        debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the default locations
    ///
    /// Resolution order: `SALVIZ_CONFIG_PATH`, then `salviz.toml` in the
    /// working directory, then built-in defaults.
    pub fn load() -> SalvizResult<AppConfig> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_config(DEFAULT_CONFIG_FILE)?
        } else {
            debug!("No configuration file found, using defaults");
            let config = AppConfig::default();
            validation::validate(&config).map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }
}

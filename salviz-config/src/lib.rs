//! Configuration management for the salviz visualization suite

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{AppConfig, DataConfig, LoggingSettings, OutputConfig};

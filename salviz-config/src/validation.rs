//! Configuration validation rules

use crate::settings::AppConfig;

/// Render scale bounds; anything outside produces unusable artifacts
const MIN_SCALE: f64 = 0.25;
const MAX_SCALE: f64 = 8.0;

/// Validate a loaded configuration, returning a human-readable message
/// for the first violation found
pub fn validate(config: &AppConfig) -> Result<(), String> {
    if config.data.file.as_os_str().is_empty() {
        return Err("data.file must not be empty".to_string());
    }

    if config.output.directory.as_os_str().is_empty() {
        return Err("output.directory must not be empty".to_string());
    }

    if !config.output.scale.is_finite()
        || config.output.scale < MIN_SCALE
        || config.output.scale > MAX_SCALE
    {
        return Err(format!(
            "output.scale must be between {MIN_SCALE} and {MAX_SCALE}, got {}",
            config.output.scale
        ));
    }

    if config.logging.level.trim().is_empty() {
        return Err("logging.level must not be empty".to_string());
    }

    Ok(())
}

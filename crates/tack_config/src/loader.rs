//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::TackConfig;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "tack.toml";

/// Loads and validates a `tack.toml` configuration file.
pub fn load_config(path: &Path) -> Result<TackConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `tack.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<TackConfig, ConfigError> {
    let config: TackConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks option ranges and variant templates.
fn validate_config(config: &TackConfig) -> Result<(), ConfigError> {
    let options = &config.options;
    if options.separator.is_empty() {
        return Err(ConfigError::ValidationError(
            "options.separator must not be empty".to_string(),
        ));
    }
    if options.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "options.batch_size must be at least 1".to_string(),
        ));
    }
    if options.line_cache_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "options.line_cache_capacity must be at least 1".to_string(),
        ));
    }
    for (name, template) in &config.variants {
        let template = template.trim();
        if !template.contains('&') && !template.starts_with('@') {
            return Err(ConfigError::ValidationError(format!(
                "variant '{name}' must contain '&' or start with '@', got '{template}'"
            )));
        }
    }
    Ok(())
}

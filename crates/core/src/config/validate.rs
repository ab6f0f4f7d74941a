use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Archive endpoints are non-empty
/// - Timeout and debounce are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    for (name, value) in [
        ("archive.search_url", &config.archive.search_url),
        ("archive.viewer_base_url", &config.archive.viewer_base_url),
        ("archive.details_base_url", &config.archive.details_base_url),
        ("archive.download_base_url", &config.archive.download_base_url),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    if config.archive.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "archive.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.ui.debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "ui.debounce_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog base URL is an http(s) URL
/// - Catalog timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.catalog.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.base_url cannot be empty".to_string(),
        ));
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "catalog.base_url must start with http:// or https://, got '{}'",
            base_url
        )));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

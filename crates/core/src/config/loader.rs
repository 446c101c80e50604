use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// Overrides use a double underscore between section and key,
/// e.g. `GALSEARCH_CATALOG__BASE_URL`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("GALSEARCH_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[catalog]
base_url = "http://localhost:3000/api"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:3000/api");
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("[catalog\nbase_url = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/galsearch.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        // Jail serializes with the env override tests
        figment::Jail::expect_with(|_jail| {
            let mut temp_file = NamedTempFile::new().unwrap();
            writeln!(
                temp_file,
                r#"
[catalog]
base_url = "http://127.0.0.1:3000/api"
timeout_secs = 7
"#
            )
            .unwrap();

            let config = load_config(temp_file.path()).unwrap();
            assert_eq!(config.catalog.base_url, "http://127.0.0.1:3000/api");
            assert_eq!(config.catalog.timeout_secs, 7);
            Ok(())
        });
    }
    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "galsearch.toml",
                r#"
[catalog]
base_url = "http://127.0.0.1:3000/api"
timeout_secs = 7
"#,
            )?;
            jail.set_env("GALSEARCH_CATALOG__TIMEOUT_SECS", "42");
            jail.set_env("GALSEARCH_CATALOG__USER_AGENT", "galsearch-test");

            let config = load_config(Path::new("galsearch.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.catalog.timeout_secs, 42);
            assert_eq!(config.catalog.user_agent.as_deref(), Some("galsearch-test"));
            assert_eq!(config.catalog.base_url, "http://127.0.0.1:3000/api");
            Ok(())
        });
    }

    #[test]
    fn test_single_underscore_env_is_not_nested() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("galsearch.toml", "[catalog]
timeout_secs = 7
")?;
            jail.set_env("GALSEARCH_CATALOG_TIMEOUT_SECS", "42");

            let config = load_config(Path::new("galsearch.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.catalog.timeout_secs, 7);
            Ok(())
        });
    }
}

use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// API base URL, without trailing slash (e.g., "https://www.touchgal.us/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Optional User-Agent header override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "https://www.touchgal.us/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.catalog.base_url, "https://www.touchgal.us/api");
        assert_eq!(config.catalog.timeout_secs, 30);
        assert!(config.catalog.user_agent.is_none());
    }

    #[test]
    fn test_deserialize_catalog_section() {
        let toml = r#"
[catalog]
base_url = "http://127.0.0.1:9000/api"
timeout_secs = 5
user_agent = "galsearch-test"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.catalog.timeout_secs, 5);
        assert_eq!(config.catalog.user_agent.as_deref(), Some("galsearch-test"));
    }

    #[test]
    fn test_partial_catalog_section_keeps_defaults() {
        let toml = r#"
[catalog]
timeout_secs = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.base_url, "https://www.touchgal.us/api");
        assert_eq!(config.catalog.timeout_secs, 10);
    }

    #[test]
    fn test_wrong_type_fails() {
        let toml = r#"
[catalog]
timeout_secs = "soon"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}

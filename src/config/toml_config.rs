use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_ENDPOINT, DEFAULT_MARKETS, DEFAULT_REGIONS};
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Clone, Default, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub regions: Option<String>,
    pub markets: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("regions", &self.regions)
            .field("markets", &self.markets)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FetchError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FetchError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// 檔案未設定 api_key 時，沿用命令列或環境變數提供的值
    pub fn with_api_key_fallback(mut self, api_key: Option<String>) -> Self {
        if self.source.api_key.is_none() {
            self.source.api_key = api_key;
        }
        self
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn api_key(&self) -> Option<&str> {
        self.source.api_key.as_deref()
    }

    fn regions(&self) -> &str {
        self.source.regions.as_deref().unwrap_or(DEFAULT_REGIONS)
    }

    fn markets(&self) -> &str {
        self.source.markets.as_deref().unwrap_or(DEFAULT_MARKETS)
    }

    fn timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_source(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.regions(), "us");
        assert_eq!(config.markets(), "h2h");
        assert_eq!(config.api_key(), None);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_section_overrides_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
endpoint = "https://api.the-odds-api.com/v4/sports/basketball_nba/odds/"
api_key = "from-file"
regions = "uk,eu"
markets = "spreads"
timeout_seconds = 15
"#,
        )
        .unwrap();

        assert!(config.endpoint().contains("basketball_nba"));
        assert_eq!(config.regions(), "uk,eu");
        assert_eq!(config.markets(), "spreads");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_fallback_only_fills_missing_key() {
        let config = TomlConfig::from_toml_str("").unwrap()
            .with_api_key_fallback(Some("from-env".to_string()));
        assert_eq!(config.api_key(), Some("from-env"));

        let config = TomlConfig::from_toml_str("[source]\napi_key = \"from-file\"\n")
            .unwrap()
            .with_api_key_fallback(Some("from-env".to_string()));
        assert_eq!(config.api_key(), Some("from-file"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\nendpoint = 1").unwrap_err();
        assert!(matches!(err, FetchError::ConfigError { .. }));
    }
}

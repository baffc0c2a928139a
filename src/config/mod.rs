pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, validate_url};
use std::time::Duration;

#[cfg(feature = "cli")]
use crate::domain::model::{DEFAULT_ENDPOINT, DEFAULT_MARKETS, DEFAULT_REGIONS};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "odds-fetch")]
#[command(about = "Fetch sports odds from The Odds API and print them as indented JSON")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "ODDS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_REGIONS)]
    pub regions: String,

    #[arg(long, default_value = DEFAULT_MARKETS)]
    pub markets: String,

    #[arg(long, help = "Request timeout in seconds (no timeout when unset)")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Read source settings from a TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

// 手寫 Debug，避免 api_key 出現在日誌
#[cfg(feature = "cli")]
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("regions", &self.regions)
            .field("markets", &self.markets)
            .field("timeout_secs", &self.timeout_secs)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .finish()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn regions(&self) -> &str {
        &self.regions
    }

    fn markets(&self) -> &str {
        &self.markets
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_source(self)
    }
}

/// Checks shared by every config provider. Runs before any request is built.
pub fn validate_source<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("endpoint", config.endpoint())?;

    let api_key = config.api_key();
    validate_non_empty_string("api_key", validate_required_field("api_key", &api_key)?)?;

    validate_non_empty_string("regions", config.regions())?;
    validate_non_empty_string("markets", config.markets())?;

    if config.timeout() == Some(Duration::ZERO) {
        return Err(FetchError::InvalidConfigValueError {
            field: "timeout".to_string(),
            value: "0".to_string(),
            reason: "Timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpOddsSource;
pub use config::toml_config::TomlConfig;
pub use core::fetcher::{render_pretty, OddsFetcher};
pub use domain::model::{OddsQuery, QuotaInfo};
pub use utils::error::{FetchError, Result};

pub mod fetcher;

pub use crate::domain::ports::{ConfigProvider, OddsSource};
pub use crate::utils::error::Result;

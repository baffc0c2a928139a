use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn regions(&self) -> &str;
    fn markets(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
}

/// Anything that can produce the raw odds document.
#[async_trait]
pub trait OddsSource: Send + Sync {
    async fn fetch(&self) -> Result<serde_json::Value>;
}

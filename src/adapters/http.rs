use crate::domain::model::{OddsQuery, QuotaInfo};
use crate::domain::ports::{ConfigProvider, OddsSource};
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::{Client, Request};
use serde_json::Value;

const USER_AGENT: &str = concat!("odds-fetch/", env!("CARGO_PKG_VERSION"));

/// Fetches the odds document over HTTP with a single GET.
pub struct HttpOddsSource {
    client: Client,
    endpoint: String,
    query: OddsQuery,
}

impl HttpOddsSource {
    pub fn new(client: Client, endpoint: impl Into<String>, query: OddsQuery) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            query,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config.api_key();
        let api_key = *validate_required_field("api_key", &api_key)?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        // 未設定時不加逾時，與單次阻塞呼叫的行為一致
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::new(
            client,
            config.endpoint(),
            OddsQuery::new(api_key, config.regions(), config.markets()),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self) -> Result<Request> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&self.query.to_params()[..])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl OddsSource for HttpOddsSource {
    async fn fetch(&self) -> Result<Value> {
        let request = self.build_request()?;

        tracing::debug!("Making API request to: {} ({:?})", self.endpoint, self.query);
        let response = self.client.execute(request).await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let quota = QuotaInfo::from_headers(response.headers());
        if !quota.is_empty() {
            tracing::info!(
                remaining = ?quota.requests_remaining,
                used = ?quota.requests_used,
                last = ?quota.requests_last,
                "Odds API quota"
            );
        }

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Failed to read error response body: {}", e);
                    String::new()
                }
            };
            tracing::warn!("API request rejected with status {}", status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        tracing::debug!("Received {} bytes", body.len());

        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }
}

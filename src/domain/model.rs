use reqwest::header::HeaderMap;

pub const DEFAULT_ENDPOINT: &str = "https://api.the-odds-api.com/v4/sports/soccer_epl/odds/";
pub const DEFAULT_REGIONS: &str = "us";
pub const DEFAULT_MARKETS: &str = "h2h";

/// Query parameters sent with every odds request.
#[derive(Clone)]
pub struct OddsQuery {
    pub api_key: String,
    pub regions: String,
    pub markets: String,
}

impl OddsQuery {
    pub fn new(api_key: impl Into<String>, regions: impl Into<String>, markets: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            regions: regions.into(),
            markets: markets.into(),
        }
    }

    /// Wire names in the order they are appended to the URL.
    pub fn to_params(&self) -> [(&'static str, &str); 3] {
        [
            ("apiKey", self.api_key.as_str()),
            ("regions", self.regions.as_str()),
            ("markets", self.markets.as_str()),
        ]
    }
}

// 手寫 Debug，避免 api_key 出現在日誌
impl std::fmt::Debug for OddsQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OddsQuery")
            .field("api_key", &"***")
            .field("regions", &self.regions)
            .field("markets", &self.markets)
            .finish()
    }
}

/// Usage counters the odds service reports in response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaInfo {
    pub requests_remaining: Option<u64>,
    pub requests_used: Option<u64>,
    pub requests_last: Option<u64>,
}

impl QuotaInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        Self {
            requests_remaining: read("x-requests-remaining"),
            requests_used: read("x-requests-used"),
            requests_last: read("x-requests-last"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requests_remaining.is_none()
            && self.requests_used.is_none()
            && self.requests_last.is_none()
    }
}

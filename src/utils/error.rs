use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Transport,
    Decode,
    Io,
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::Transport(_) | FetchError::HttpStatus { .. } => ErrorCategory::Transport,
            FetchError::Decode(_) => ErrorCategory::Decode,
            FetchError::IoError(_) => ErrorCategory::Io,
            FetchError::ConfigError { .. }
            | FetchError::MissingConfigError { .. }
            | FetchError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Io => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::Transport => 3,
            ErrorCategory::Decode => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FetchError::Transport(e) if e.is_timeout() => {
                "The odds service did not answer in time".to_string()
            }
            FetchError::Transport(e) if e.is_connect() => {
                "Could not connect to the odds service".to_string()
            }
            FetchError::Transport(_) => "The request to the odds service failed".to_string(),
            FetchError::HttpStatus { status, .. } => {
                format!("The odds service rejected the request (HTTP {})", status)
            }
            FetchError::Decode(_) => "The odds service returned something that is not JSON".to_string(),
            FetchError::IoError(_) => "Could not write the response".to_string(),
            FetchError::MissingConfigError { field } => format!("Missing required setting: {}", field),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "Check network connectivity and the --endpoint URL",
            FetchError::HttpStatus { status: 401, .. } => {
                "Check that the API key is valid (--api-key or ODDS_API_KEY)"
            }
            FetchError::HttpStatus { status: 429, .. } => {
                "The request quota is exhausted, wait before retrying"
            }
            FetchError::HttpStatus { .. } => "Check the endpoint, regions and markets values",
            FetchError::Decode(_) => "Verify the endpoint points at a JSON API",
            FetchError::IoError(_) => "Check that standard output is writable",
            FetchError::MissingConfigError { .. }
            | FetchError::ConfigError { .. }
            | FetchError::InvalidConfigValueError { .. } => {
                "Fix the configuration flags, environment or config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

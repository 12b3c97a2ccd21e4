use thiserror::Error;

/// Outcome classification for a single call against the news API.
///
/// No retries happen at this level; callers pattern-match on the variant and
/// decide how to present the failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("news API rejected the request: {0}")]
    ApiRejected(String),

    #[error("news API key is invalid or expired")]
    Unauthorized,

    #[error("news API rate limit exceeded")]
    RateLimited,

    #[error("news API returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("news API request timed out")]
    Timeout,

    #[error("could not connect to the news API")]
    ConnectionFailed,

    #[error("news API request failed: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Readable explanation suitable for embedding in a chat reply.
    pub fn user_hint(&self) -> String {
        match self {
            FetchError::ApiRejected(msg) => format!("API returned error: {msg}"),
            FetchError::Unauthorized => {
                "API key is invalid or expired. Please check your News API key.".to_string()
            }
            FetchError::RateLimited => {
                "API rate limit exceeded. Please try again later.".to_string()
            }
            FetchError::UnexpectedStatus(code) => {
                format!("API returned status code {code}")
            }
            FetchError::Timeout => {
                "Request timeout. News API is taking too long to respond.".to_string()
            }
            FetchError::ConnectionFailed => {
                "Connection error. Please check your internet connection.".to_string()
            }
            FetchError::Unknown(detail) => format!("Unexpected error: {detail}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectionFailed
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid configuration value: {0}")]
    Invalid(String),
}

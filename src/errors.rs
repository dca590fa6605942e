use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse feed: {0}")]
    FeedParse(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to access completion API: {0}")]
    Completion(String),

    #[error("Failed to deliver message: {0}")]
    Delivery(String),

    #[error("Failed to write audit snapshot: {0}")]
    Storage(String),

    #[error("Failed to serialize data: {0}")]
    Serialization(String),
}

impl DigestError {
    /// True for errors the collaborator raised because the feed body could not be parsed,
    /// as opposed to the request itself failing.
    #[must_use]
    pub fn is_malformed_feed(&self) -> bool {
        matches!(self, DigestError::FeedParse(_))
    }
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            DigestError::Http(format!("request timed out: {error}"))
        } else {
            DigestError::Http(error.to_string())
        }
    }
}

impl From<std::io::Error> for DigestError {
    fn from(error: std::io::Error) -> Self {
        DigestError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(error: serde_json::Error) -> Self {
        DigestError::Serialization(error.to_string())
    }
}

impl From<toml::de::Error> for DigestError {
    fn from(error: toml::de::Error) -> Self {
        DigestError::Config(error.to_string())
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CinemetaError>;

#[derive(Debug, Error)]
pub enum CinemetaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CinemetaError {
    fn from(err: reqwest::Error) -> Self {
        CinemetaError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CinemetaError {
    fn from(err: serde_json::Error) -> Self {
        CinemetaError::Parse(err.to_string())
    }
}

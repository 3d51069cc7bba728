use thiserror::Error;

pub type Result<T> = std::result::Result<T, KitsuError>;

#[derive(Debug, Error)]
pub enum KitsuError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for KitsuError {
    fn from(err: reqwest::Error) -> Self {
        KitsuError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for KitsuError {
    fn from(err: serde_json::Error) -> Self {
        KitsuError::Parse(err.to_string())
    }
}

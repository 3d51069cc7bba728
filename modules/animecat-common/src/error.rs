use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Item source error: {0}")]
    Source(String),

    #[error("Catalog sink error: {0}")]
    Sink(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

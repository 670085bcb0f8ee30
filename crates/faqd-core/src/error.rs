//! Error types for faqd

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the faqd system
#[derive(Error, Debug)]
pub enum Error {
    #[error("embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("LLM provider error: {0}")]
    LLMProvider(String),

    #[error("vector index error: {0}")]
    VectorIndex(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("nothing to search: {0}")]
    NoIndex(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("authentication error: {0}")]
    Authentication(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("timeout error: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

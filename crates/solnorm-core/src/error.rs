//! Error types for the outer surfaces of the engine
//!
//! The normalizers, resolver, and editor operations are total and never
//! return these. Only loading documents and configuration can fail.

use thiserror::Error;

/// Solnorm I/O and decoding errors
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a document or configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not JSON at all (shape problems are never errors)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be decoded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type alias for solnorm operations
pub type Result<T> = std::result::Result<T, Error>;

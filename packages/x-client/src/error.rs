//! Error types for the X client.

use thiserror::Error;

/// Result type for X client operations.
pub type Result<T> = std::result::Result<T, XError>;

#[derive(Debug, Error)]
pub enum XError {
    /// Missing token or unusable request parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response (auth failure, duplicate content, rate limit)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Success status but the body was not the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

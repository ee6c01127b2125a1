//! Error types for the Reddit client.

use thiserror::Error;

/// Result type for Reddit client operations.
pub type Result<T> = std::result::Result<T, RedditError>;

/// Reddit client errors.
#[derive(Debug, Error)]
pub enum RedditError {
    /// Network error (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from Reddit
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Token exchange succeeded at the HTTP level but returned no usable token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response body did not match the Listing shape
    #[error("Parse error: {0}")]
    Parse(String),
}

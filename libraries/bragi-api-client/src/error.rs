//! Error types for the Bragi API client.

use thiserror::Error;

/// Errors that can occur when talking to the Bragi backend.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

impl From<ApiClientError> for bragi_core::BragiError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Request(e) => bragi_core::BragiError::network(e.to_string()),
            ApiClientError::ServerUnreachable(msg) => bragi_core::BragiError::network(msg),
            other => bragi_core::BragiError::Other(other.to_string()),
        }
    }
}

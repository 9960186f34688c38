//! Core error types for Bragi

use thiserror::Error;

/// Result type alias using `BragiError`
pub type Result<T> = std::result::Result<T, BragiError>;

/// Core error type for the Bragi playback session
#[derive(Error, Debug)]
pub enum BragiError {
    /// A playable URL could not be obtained for a track
    #[error("Resolve error for track {track_id}: {message}")]
    Resolve {
        /// Identifier of the track that failed to resolve
        track_id: String,
        /// Underlying failure description
        message: String,
    },

    /// Play reporting failed (callers treat this as ignorable)
    #[error("Report error: {0}")]
    Report(String),

    /// Snapshot storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network-level failure talking to a backend
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl BragiError {
    /// Create a resolve error
    pub fn resolve(track_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolve {
            track_id: track_id.into(),
            message: message.into(),
        }
    }

    /// Create a report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

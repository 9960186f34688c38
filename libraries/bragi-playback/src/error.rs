//! Error types for playback session management

use thiserror::Error;

/// Playback errors
///
/// Session commands never return these to callers; they surface only at the
/// transport seam, where the manager degrades them to a paused state.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The underlying audio transport refused an operation
    /// (autoplay policy, codec problem, missing source)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl PlaybackError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

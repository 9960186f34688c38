//! Session events
//!
//! Event-based communication for UI synchronization. The manager queues
//! events as it mutates the session; the embedding shell drains them with
//! [`SessionManager::take_events`](crate::SessionManager::take_events) and
//! treats every drained batch as a persistable change for the snapshot
//! reconciliation loop.

use serde::{Deserialize, Serialize};

/// Events emitted by the session manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The transport play state flipped
    StateChanged {
        /// Whether the transport is now playing
        is_playing: bool,
    },

    /// The current track changed (command, natural end, or restore)
    TrackChanged {
        /// ID of the new current track
        track_id: String,
        /// Queue index of the new current track
        index: usize,
    },

    /// Playback position moved
    PositionChanged {
        /// Current position in seconds
        position_secs: f64,
        /// Known duration in seconds, 0 until reported
        duration_secs: f64,
    },

    /// Queue contents were replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// The session was explicitly cleared; the stored snapshot must go too
    SessionCleared,

    /// A persisted session was restored at startup
    SessionRestored {
        /// Number of restored tracks
        length: usize,
    },
}

impl SessionEvent {
    /// Whether this event invalidates the stored snapshot
    pub fn clears_snapshot(&self) -> bool {
        matches!(self, SessionEvent::SessionCleared)
    }
}

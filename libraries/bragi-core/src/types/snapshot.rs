//! Durable projection of a playback session
//!
//! The snapshot is the single keyed durable-storage entry owned by the
//! playback core. It carries the queue (with ephemeral upload URLs already
//! stripped by the projection), the current position, and the transport
//! flags worth resuming. Duration is deliberately absent: the transport
//! reports it again after restore.

use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Storage key for the persisted session snapshot
pub const SNAPSHOT_KEY: &str = "bragi_player_state";

/// Reduced, durable projection of a session
///
/// The format is forward-compatible: every field defaults, unknown fields are
/// ignored, and a payload that fails to decode is treated as absent rather
/// than as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Queue in play order; uploaded tracks have `audio_url` stripped
    #[serde(default)]
    pub queue: Vec<Track>,

    /// Index of the current track (clamped on restore)
    #[serde(default)]
    pub current_index: usize,

    /// Playback position in seconds, restored as a pending seek
    #[serde(default)]
    pub current_time: f64,

    /// Whether playback should be resumed best-effort after restore
    #[serde(default)]
    pub is_playing: bool,
}

impl SessionSnapshot {
    /// Encode to the stored JSON representation
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored payload, treating malformed input as absent
    pub fn from_json_lossy(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Whether there is anything worth restoring
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

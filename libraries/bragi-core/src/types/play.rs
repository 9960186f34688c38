//! Play report payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Track;

/// A single track-start, reported fire-and-forget to the play log backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedTrack {
    /// Identifier of the track that started
    pub track_id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// URL that was actually played, if any
    pub audio_url: Option<String>,

    /// Known duration in milliseconds
    pub duration_ms: Option<u64>,

    /// When audible playback began
    pub played_at: DateTime<Utc>,
}

impl PlayedTrack {
    /// Build a report for a track that just started playing
    pub fn starting_now(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            audio_url: track.audio_url.clone(),
            duration_ms: track.duration_ms,
            played_at: Utc::now(),
        }
    }
}

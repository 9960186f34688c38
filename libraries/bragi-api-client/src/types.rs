//! Wire types for the Bragi backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /api/uploads/download`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadUrlResponse {
    /// Freshly signed, time-limited playable URL
    pub url: Option<String>,
}

/// Body of `POST /api/plays`
///
/// Field names follow the play-log backend's insert schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayReportBody {
    /// Identifier of the played track
    pub track_id: String,
    /// Track title
    pub track_name: String,
    /// Artist name
    pub artist_name: String,
    /// URL that was played, if any
    pub preview_url: Option<String>,
    /// Known duration in milliseconds
    pub duration_ms: Option<u64>,
    /// When audible playback began
    pub played_at: DateTime<Utc>,
}

impl From<&bragi_core::PlayedTrack> for PlayReportBody {
    fn from(played: &bragi_core::PlayedTrack) -> Self {
        Self {
            track_id: played.track_id.clone(),
            track_name: played.title.clone(),
            artist_name: played.artist.clone(),
            preview_url: played.audio_url.clone(),
            duration_ms: played.duration_ms,
            played_at: played.played_at,
        }
    }
}

//! Track domain type

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a track's media URL comes from, and therefore how long it lives.
///
/// Externally-hosted preview URLs are treated as durable for the session and
/// survive persistence unchanged. Uploaded files are served through signed
/// URLs with a finite lifetime; their URL must never be trusted across a
/// restart and is re-resolved from the track id (the storage path).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackOrigin {
    /// Hosted by an external catalog; `audio_url` is durable
    #[default]
    ExternallyHosted,

    /// Uploaded by the user; `audio_url` is an ephemeral signed link
    UserUploaded,
}

/// A playable unit in the session queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque identifier; for uploads this is also the storage path used to
    /// re-resolve a playable URL
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover image URL (absent for uploads)
    #[serde(default)]
    pub cover_url: Option<String>,

    /// URL currently believed playable; `None` when not yet resolved or
    /// permanently unavailable
    #[serde(default)]
    pub audio_url: Option<String>,

    /// Known duration in milliseconds, used as a fallback before the
    /// transport reports the real duration
    #[serde(default)]
    pub duration_ms: Option<u64>,

    /// Durable vs. ephemeral media URL
    #[serde(default)]
    pub origin: TrackOrigin,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        origin: TrackOrigin,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_url: None,
            audio_url: None,
            duration_ms: None,
            origin,
        }
    }

    /// Set the audio URL (builder style)
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Set the known duration (builder style)
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis() as u64);
        self
    }

    /// Whether this track's media URL is ephemeral
    pub fn is_uploaded(&self) -> bool {
        self.origin == TrackOrigin::UserUploaded
    }

    /// Fallback duration in seconds, before the transport reports one
    pub fn fallback_duration_secs(&self) -> f64 {
        self.duration_ms.map_or(0.0, |ms| ms as f64 / 1000.0)
    }
}

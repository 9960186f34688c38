//! In-memory playback session state
//!
//! The session is the single source of truth for the UI: the queue, the
//! transport flags, and the progress fields. It is mutated exclusively by the
//! [`SessionManager`](crate::SessionManager); everything here is observation
//! plus the pure snapshot projection.

use crate::queue::TrackQueue;
use bragi_core::types::{SessionSnapshot, Track};

/// Observable playback session state
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) queue: TrackQueue,
    pub(crate) is_playing: bool,
    pub(crate) current_time: f64,
    pub(crate) duration: f64,
    pub(crate) pending_seek: Option<f64>,
}

impl Session {
    /// Create a new empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered track queue
    pub fn queue(&self) -> &TrackQueue {
        &self.queue
    }

    /// Track at the current queue position
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Current queue index; meaningless when the queue is empty
    pub fn current_index(&self) -> usize {
        self.queue.current_index()
    }

    /// Whether the transport is audibly playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playback position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Track duration in seconds, 0 until known
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seek target waiting for the transport to report metadata
    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    /// Project the session onto its durable form.
    ///
    /// Pure function of the session: uploaded tracks lose their signed
    /// `audio_url` (it will not outlive the process), externally-hosted
    /// tracks keep theirs. Duration and pending seek are not persisted; the
    /// transport reports duration again after restore, and the persisted
    /// `current_time` becomes the next pending seek.
    pub fn snapshot(&self) -> SessionSnapshot {
        let queue = self
            .queue
            .tracks()
            .iter()
            .map(|track| {
                let mut persisted = track.clone();
                if persisted.is_uploaded() {
                    persisted.audio_url = None;
                }
                persisted
            })
            .collect();

        SessionSnapshot {
            queue,
            current_index: self.queue.current_index(),
            current_time: if self.current_time.is_finite() {
                self.current_time.max(0.0)
            } else {
                0.0
            },
            is_playing: self.is_playing,
        }
    }

    /// Reset every transport-derived field to its initial value
    pub(crate) fn reset_transport_fields(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.pending_seek = None;
    }
}

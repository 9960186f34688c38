//! Collaborator traits for the Bragi playback session

use crate::error::Result;
use crate::types::{PlayedTrack, SessionSnapshot};
use async_trait::async_trait;

/// Exchanges a storage identifier for a time-limited playable URL.
///
/// Consulted for `UserUploaded` tracks only: during restore, and whenever an
/// uploaded track is newly added to the queue by the surrounding application.
/// Externally-hosted preview URLs are never re-resolved.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Obtain a fresh playable URL for the given track id (storage path)
    async fn resolve(&self, track_id: &str) -> Result<String>;
}

/// Receives a notification whenever a track actually begins audible playback.
///
/// Fire-and-forget: callers ignore failures. Only externally-hosted tracks
/// are reported; uploaded-track plays stay private.
#[async_trait]
pub trait PlayReporter: Send + Sync {
    /// Record one track-start
    async fn report(&self, played: &PlayedTrack) -> Result<()>;
}

/// Durable storage for the single keyed session snapshot.
///
/// Implementations own exactly one entry (see
/// [`SNAPSHOT_KEY`](crate::types::SNAPSHOT_KEY)). An absent or unreadable
/// entry loads as `None`; it is never an error.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot, if any
    async fn load(&self) -> Result<Option<SessionSnapshot>>;

    /// Overwrite the stored snapshot
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;

    /// Remove the stored snapshot
    async fn delete(&self) -> Result<()>;
}

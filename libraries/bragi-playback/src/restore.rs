//! Restore reconciliation
//!
//! Runs once per process start: reads the persisted snapshot, re-resolves
//! playable URLs for uploaded tracks (their signed links never survive a
//! restart), and installs the result into the session manager. Resolution is
//! concurrent but order-preserving, and the restored queue is installed only
//! after every resolution settles.
//!
//! Restore never fails loudly. A missing or unreadable snapshot means "no
//! saved session"; a resolver failure makes that one track inert without
//! touching the queue shape; a restore superseded by an explicit command is
//! discarded wholesale.

use crate::manager::SessionManager;
use bragi_core::{ResourceResolver, SnapshotStore, types::Track};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

/// Captures the command epoch at the start of a restore attempt.
///
/// Produced by [`SessionManager::begin_restore`]; a token whose epoch has
/// been superseded by a queue-replacing command makes
/// [`SessionManager::install_restored`] a no-op.
#[derive(Debug, Clone, Copy)]
pub struct RestoreToken {
    pub(crate) epoch: u64,
}

/// A snapshot reconciled against fresh resource URLs, ready to install
#[derive(Debug, Clone)]
pub struct RestoredSession {
    /// Restored queue in original order; uploaded tracks carry their fresh
    /// URL, or `None` when resolution failed
    pub queue: Vec<Track>,
    /// Snapshot index, clamped into the restored queue's bounds
    pub current_index: usize,
    /// Persisted position, applied as the initial pending seek
    pub pending_seek: Option<f64>,
    /// Whether the snapshot recorded active playback
    pub resume_playback: bool,
}

/// Read the stored snapshot and resolve it into an installable session.
///
/// Returns `None` when there is nothing to restore: no stored entry, an
/// unreadable one, or an empty queue.
pub async fn load_restored_session(
    store: &dyn SnapshotStore,
    resolver: &dyn ResourceResolver,
) -> Option<RestoredSession> {
    let snapshot = match store.load().await {
        Ok(snapshot) => snapshot?,
        Err(error) => {
            warn!(%error, "could not read session snapshot; starting empty");
            return None;
        }
    };
    if snapshot.is_empty() {
        return None;
    }

    // Uploaded tracks go through the resolver concurrently; join_all keeps
    // the original queue order regardless of completion order.
    let queue: Vec<Track> = join_all(
        snapshot
            .queue
            .into_iter()
            .map(|track| resolve_track(resolver, track)),
    )
    .await;

    let current_index = snapshot.current_index.min(queue.len() - 1);
    let pending_seek = if snapshot.current_time.is_finite() {
        Some(snapshot.current_time.max(0.0))
    } else {
        None
    };

    debug!(
        tracks = queue.len(),
        current_index,
        resume = snapshot.is_playing,
        "restored session snapshot"
    );

    Some(RestoredSession {
        queue,
        current_index,
        pending_seek,
        resume_playback: snapshot.is_playing,
    })
}

/// Restore the manager from durable storage, once, start to finish.
///
/// Convenience wrapper over [`SessionManager::begin_restore`],
/// [`load_restored_session`], and [`SessionManager::install_restored`] for
/// shells that own the manager exclusively during startup. Returns whether a
/// session was installed.
pub async fn restore_session(
    manager: &mut SessionManager,
    store: &dyn SnapshotStore,
    resolver: &dyn ResourceResolver,
) -> bool {
    let token = manager.begin_restore();
    let Some(restored) = load_restored_session(store, resolver).await else {
        return false;
    };

    let installed = manager.install_restored(token, restored);
    if installed {
        info!(
            tracks = manager.session().queue().len(),
            "playback session restored"
        );
    }
    installed
}

async fn resolve_track(resolver: &dyn ResourceResolver, mut track: Track) -> Track {
    if !track.is_uploaded() {
        // Externally-hosted preview URLs are durable; reuse as persisted.
        return track;
    }

    match resolver.resolve(&track.id).await {
        Ok(url) => track.audio_url = Some(url),
        Err(error) => {
            // The track stays in the queue, inert until a URL shows up.
            warn!(track_id = %track.id, %error, "could not re-resolve uploaded track");
            track.audio_url = None;
        }
    }
    track
}

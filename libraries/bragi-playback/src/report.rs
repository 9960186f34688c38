//! Fire-and-forget play reporting
//!
//! Track-starts are enqueued synchronously from the session manager and
//! drained by a background task that calls the [`PlayReporter`]. Reporting
//! failures are logged at debug level and dropped; nothing about playback
//! depends on the report landing.

use bragi_core::{PlayReporter, PlayedTrack};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Handle for enqueueing play reports
#[derive(Debug, Clone)]
pub struct PlayReportQueue {
    tx: mpsc::UnboundedSender<PlayedTrack>,
}

impl PlayReportQueue {
    /// Spawn the drain task for a reporter and return the enqueue handle.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn(reporter: Arc<dyn PlayReporter>) -> Self {
        let (queue, rx) = Self::channel();
        tokio::spawn(drain(reporter, rx));
        queue
    }

    /// Create a detached queue plus its receiving end.
    ///
    /// Useful for embedding the drain loop elsewhere, and for tests that
    /// want to observe what would have been reported.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PlayedTrack>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue one track-start; never blocks, never fails loudly
    pub fn enqueue(&self, played: PlayedTrack) {
        let _ = self.tx.send(played);
    }
}

async fn drain(reporter: Arc<dyn PlayReporter>, mut rx: mpsc::UnboundedReceiver<PlayedTrack>) {
    while let Some(played) = rx.recv().await {
        if let Err(error) = reporter.report(&played).await {
            debug!(track_id = %played.track_id, %error, "play report dropped");
        }
    }
}

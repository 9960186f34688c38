//! Debounced snapshot persistence
//!
//! The saver owns the debounce timer: every scheduled save replaces the
//! pending snapshot and resets (never queues) the timer, so rapid updates
//! such as continuous time progress collapse into one write of the last
//! settled state. A delete cancels whatever is pending and removes the
//! stored entry immediately.

use crate::{events::SessionEvent, manager::SessionManager};
use bragi_core::{SnapshotStore, types::SessionSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Debounce window used by the original player
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug)]
enum SaveCommand {
    Save(SessionSnapshot),
    Delete,
}

/// Handle to the background saver task
#[derive(Debug, Clone)]
pub struct SnapshotSaver {
    tx: mpsc::UnboundedSender<SaveCommand>,
}

impl SnapshotSaver {
    /// Spawn the saver task over a snapshot store.
    ///
    /// Must be called within a Tokio runtime. The task exits when the last
    /// handle is dropped, flushing any pending snapshot first.
    pub fn spawn(store: Arc<dyn SnapshotStore>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, debounce, rx));
        Self { tx }
    }

    /// Schedule a write of `snapshot`, resetting the debounce timer.
    ///
    /// Only the last snapshot scheduled within the window is ever written.
    pub fn schedule_save(&self, snapshot: SessionSnapshot) {
        let _ = self.tx.send(SaveCommand::Save(snapshot));
    }

    /// Cancel any pending write and delete the stored snapshot
    pub fn delete(&self) {
        let _ = self.tx.send(SaveCommand::Delete);
    }
}

/// Feed one drained event batch into the saver.
///
/// This is the body of the reconciliation loop: an explicit clear deletes
/// the stored entry, any other settled change schedules a debounced write of
/// the current projection.
pub fn persist_changes(saver: &SnapshotSaver, manager: &SessionManager, events: &[SessionEvent]) {
    if events.is_empty() {
        return;
    }

    let cleared = events.iter().any(SessionEvent::clears_snapshot);
    if cleared && manager.session().queue().is_empty() {
        saver.delete();
    } else {
        saver.schedule_save(manager.snapshot());
    }
}

async fn run(
    store: Arc<dyn SnapshotStore>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<SaveCommand>,
) {
    let mut pending: Option<SessionSnapshot> = None;

    loop {
        let command = if pending.is_some() {
            tokio::select! {
                command = rx.recv() => command,
                () = tokio::time::sleep(debounce) => {
                    if let Some(snapshot) = pending.take() {
                        write(store.as_ref(), &snapshot).await;
                    }
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match command {
            Some(SaveCommand::Save(snapshot)) => pending = Some(snapshot),
            Some(SaveCommand::Delete) => {
                pending = None;
                if let Err(error) = store.delete().await {
                    warn!(%error, "could not delete session snapshot");
                }
            }
            None => {
                // All handles dropped: flush the last settled state.
                if let Some(snapshot) = pending.take() {
                    write(store.as_ref(), &snapshot).await;
                }
                break;
            }
        }
    }
}

async fn write(store: &dyn SnapshotStore, snapshot: &SessionSnapshot) {
    if let Err(error) = store.save(snapshot).await {
        warn!(%error, "could not persist session snapshot");
    }
}

//! Full persistence round trip: session manager -> debounced saver ->
//! SQLite store -> process "restart" -> restore reconciliation.

use async_trait::async_trait;
use bragi_core::types::{Track, TrackOrigin};
use bragi_core::{BragiError, ResourceResolver, SnapshotStore};
use bragi_playback::{
    persist_changes, restore_session, AudioTransport, NotificationSink, Result as PlaybackResult,
    SessionManager, SnapshotSaver, TransportAdapter,
};
use bragi_storage::SqliteSnapshotStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct SilentTransport;

impl AudioTransport for SilentTransport {
    fn load(&mut self, _url: &str, _sink: NotificationSink) -> PlaybackResult<()> {
        Ok(())
    }
    fn play(&mut self) -> PlaybackResult<()> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn seek_to(&mut self, _seconds: f64) {}
    fn unload(&mut self) {}
}

fn manager() -> SessionManager {
    let (adapter, _notifications) = TransportAdapter::new(Box::new(SilentTransport));
    SessionManager::new(adapter)
}

struct StubResolver;

#[async_trait]
impl ResourceResolver for StubResolver {
    async fn resolve(&self, track_id: &str) -> bragi_core::Result<String> {
        if track_id == "user-1/upload.mp3" {
            Ok("https://signed.example.com/fresh".to_string())
        } else {
            Err(BragiError::resolve(track_id, "unknown path"))
        }
    }
}

async fn scratch_store() -> (Arc<SqliteSnapshotStore>, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}/bragi.db", dir.path().display());
    let store = SqliteSnapshotStore::open(&url).await.expect("store");
    (Arc::new(store), dir)
}

#[tokio::test]
async fn session_survives_a_restart_through_the_saver() {
    let (store, _dir) = scratch_store().await;
    let saver = SnapshotSaver::spawn(store.clone(), Duration::from_millis(10));

    // "First process": populate a session and let the reconciliation loop
    // mirror it into storage.
    let mut first = manager();
    first.set_queue(
        vec![
            Track::new("ext-1", "Preview", "Artist", TrackOrigin::ExternallyHosted)
                .with_audio_url("https://cdn.example.com/p.mp3"),
            Track::new("user-1/upload.mp3", "Mine", "Me", TrackOrigin::UserUploaded)
                .with_audio_url("https://signed.example.com/stale?token=old"),
        ],
        true,
    );
    first.next();

    let events = first.take_events();
    persist_changes(&saver, &first, &events);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let stored = store.load().await.unwrap().expect("snapshot written");
    assert_eq!(stored.current_index, 1);
    assert!(stored.queue[1].audio_url.is_none(), "signed URL persisted");
    assert_eq!(
        stored.queue[0].audio_url.as_deref(),
        Some("https://cdn.example.com/p.mp3")
    );

    // "Second process": restore through the resolver.
    let mut second = manager();
    assert!(restore_session(&mut second, store.as_ref(), &StubResolver).await);

    let session = second.session();
    assert_eq!(session.current_index(), 1);
    assert_eq!(
        session.queue().get(1).unwrap().audio_url.as_deref(),
        Some("https://signed.example.com/fresh")
    );
    assert_eq!(
        session.queue().get(0).unwrap().audio_url.as_deref(),
        Some("https://cdn.example.com/p.mp3")
    );
}

#[tokio::test]
async fn clearing_the_session_deletes_the_stored_snapshot() {
    let (store, _dir) = scratch_store().await;
    let saver = SnapshotSaver::spawn(store.clone(), Duration::from_millis(10));

    let mut manager = manager();
    manager.set_queue(
        vec![
            Track::new("ext-1", "Preview", "Artist", TrackOrigin::ExternallyHosted)
                .with_audio_url("https://cdn.example.com/p.mp3"),
        ],
        false,
    );
    let events = manager.take_events();
    persist_changes(&saver, &manager, &events);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(store.load().await.unwrap().is_some());

    manager.clear();
    let events = manager.take_events();
    persist_changes(&saver, &manager, &events);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(store.load().await.unwrap().is_none());
}

//! Bragi - Playback Session Management
//!
//! Platform-agnostic playback session management for Bragi.
//!
//! This crate provides:
//! - The session store: ordered queue, current position, transport flags
//! - The transport adapter over a single native audio primitive
//! - Pending-seek handling for not-yet-loaded sources
//! - Debounced snapshot persistence and startup restore reconciliation
//! - Fire-and-forget play reporting for externally-hosted tracks
//!
//! # Architecture
//!
//! `bragi-playback` is completely platform-agnostic:
//! - No dependency on any concrete audio backend
//! - No dependency on `bragi-storage` (durable storage arrives via the
//!   [`SnapshotStore`](bragi_core::SnapshotStore) trait)
//! - No dependency on `bragi-api-client` (resolution and reporting arrive
//!   via the [`ResourceResolver`](bragi_core::ResourceResolver) and
//!   [`PlayReporter`](bragi_core::PlayReporter) traits)
//!
//! Platform-specific code (the actual audio element, the HTTP backends) is
//! provided by the embedding shell.
//!
//! # Example: driving a session
//!
//! ```rust
//! use bragi_playback::{
//!     AudioTransport, NotificationSink, Result, SessionManager, TransportAdapter,
//! };
//! use bragi_core::types::{Track, TrackOrigin};
//!
//! // Implement AudioTransport for your platform's audio primitive
//! struct SilentTransport;
//!
//! impl AudioTransport for SilentTransport {
//!     fn load(&mut self, _url: &str, _sink: NotificationSink) -> Result<()> {
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek_to(&mut self, _seconds: f64) {}
//!     fn unload(&mut self) {}
//! }
//!
//! let (transport, _notifications) = TransportAdapter::new(Box::new(SilentTransport));
//! let mut manager = SessionManager::new(transport);
//!
//! let track = Track::new("t1", "My Song", "Artist", TrackOrigin::ExternallyHosted)
//!     .with_audio_url("https://cdn.example.com/t1.mp3");
//! manager.play_track(track);
//!
//! assert!(manager.session().is_playing());
//! ```
//!
//! # The reconciliation loop
//!
//! The embedding shell owns one loop that drains transport notifications
//! into the manager and mirrors every settled change into durable storage:
//!
//! ```rust,ignore
//! // once, at startup
//! bragi_playback::restore_session(&mut manager, store.as_ref(), resolver.as_ref()).await;
//!
//! // forever after
//! while let Some(tagged) = notifications.recv().await {
//!     manager.handle_notification(tagged);
//!     let events = manager.take_events();
//!     bragi_playback::persist_changes(&saver, &manager, &events);
//! }
//! ```

mod error;
mod events;
mod manager;
mod persist;
mod queue;
mod report;
mod restore;
mod session;
mod transport;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use manager::SessionManager;
pub use persist::{persist_changes, SnapshotSaver, DEFAULT_DEBOUNCE};
pub use queue::TrackQueue;
pub use report::PlayReportQueue;
pub use restore::{load_restored_session, restore_session, RestoreToken, RestoredSession};
pub use session::Session;
pub use transport::{
    AudioTransport, NotificationSink, TaggedNotification, TransportAdapter, TransportNotification,
};

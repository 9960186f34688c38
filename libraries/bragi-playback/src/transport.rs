//! Transport adapter
//!
//! Wraps the single native audio-playback primitive behind the
//! [`AudioTransport`] trait. The adapter is created once per process and
//! injected into the session manager at construction; the primitive is never
//! recreated (recreating loses event wiring and can double-fire audio).
//!
//! Notifications are pushed, not polled. Each `load` hands the backend a
//! fresh [`NotificationSink`] carrying that load's generation; the backend
//! must drop the previous sink when it receives a new one, which is the
//! unsubscription of the superseded load. A late notification from an old
//! sink still carries the old generation and is discarded by the manager, so
//! a progress tick from a replaced track can never corrupt the new track's
//! state.

use crate::error::{PlaybackError, Result};
use tokio::sync::mpsc;
use tracing::debug;

/// Notifications pushed by the audio transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportNotification {
    /// Playback position moved (seconds)
    TimeUpdated(f64),

    /// Source metadata is available; duration in seconds
    MetadataReady(f64),

    /// The current source reached its natural end
    Ended,

    /// Audible playback began
    PlaybackStarted,

    /// Playback was paused (by command or by the platform)
    PlaybackPaused,
}

/// A [`TransportNotification`] tagged with the generation of the load that
/// produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedNotification {
    /// Load generation the notification belongs to
    pub generation: u64,
    /// The notification itself
    pub notification: TransportNotification,
}

/// Event sink handed to the backend on each load.
///
/// The sink is bound to one load generation for its whole life. Emitting
/// never blocks and never fails loudly; once the receiving side is gone the
/// notification is simply dropped.
#[derive(Debug, Clone)]
pub struct NotificationSink {
    generation: u64,
    tx: mpsc::UnboundedSender<TaggedNotification>,
}

impl NotificationSink {
    /// Push a notification for this sink's load
    pub fn emit(&self, notification: TransportNotification) {
        let _ = self.tx.send(TaggedNotification {
            generation: self.generation,
            notification,
        });
    }

    /// The load generation this sink is bound to
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The native audio-playback primitive, abstracted.
///
/// Implementations wrap exactly one platform player (an HTML audio element,
/// a system media player, a test double). Contract:
/// - `load` sets the source and stores the sink, dropping any previous sink;
///   it does not start playback.
/// - `play` returns `Err` when the platform refuses (autoplay policy, codec
///   problem). The adapter degrades that to a paused state; implementations
///   must not panic.
/// - Notifications for a source go through the sink received with its load.
pub trait AudioTransport: Send {
    /// Set the source URL; does not start playback
    fn load(&mut self, url: &str, sink: NotificationSink) -> Result<()>;

    /// Begin or resume playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Jump to a position in seconds
    fn seek_to(&mut self, seconds: f64);

    /// Drop the current source and release the sink
    fn unload(&mut self);
}

/// Owns the process-wide audio transport and tags its notifications.
///
/// All control of the underlying primitive goes through here; the session
/// manager holds the adapter exclusively and no other component may touch
/// the transport directly.
pub struct TransportAdapter {
    backend: Box<dyn AudioTransport>,
    tx: mpsc::UnboundedSender<TaggedNotification>,
    generation: u64,
}

impl TransportAdapter {
    /// Wrap a backend, returning the adapter and the notification stream.
    ///
    /// Notifications arrive in emission order.
    pub fn new(
        backend: Box<dyn AudioTransport>,
    ) -> (Self, mpsc::UnboundedReceiver<TaggedNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                tx,
                generation: 0,
            },
            rx,
        )
    }

    /// Load a new source, starting a new generation.
    ///
    /// Returns the generation on success so the caller can filter stale
    /// notifications. The generation advances even when the backend refuses
    /// the load, invalidating notifications from the previous source.
    pub fn load(&mut self, url: &str) -> Result<u64> {
        self.generation += 1;
        let sink = NotificationSink {
            generation: self.generation,
            tx: self.tx.clone(),
        };
        self.backend.load(url, sink)?;
        Ok(self.generation)
    }

    /// Best-effort play: `true` when the transport accepted.
    ///
    /// A refusal (autoplay policy, nothing loaded) is logged and swallowed;
    /// the caller stays paused with no error surfaced.
    pub fn try_play(&mut self) -> bool {
        match self.backend.play() {
            Ok(()) => true,
            Err(PlaybackError::Transport(reason)) => {
                debug!(%reason, "transport refused play; staying paused");
                false
            }
        }
    }

    /// Pause the transport
    pub fn pause(&mut self) {
        self.backend.pause();
    }

    /// Jump to a position in seconds
    pub fn seek_to(&mut self, seconds: f64) {
        self.backend.seek_to(seconds);
    }

    /// Drop the current source
    pub fn unload(&mut self) {
        self.backend.unload();
    }

    /// Generation of the most recent load
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TransportAdapter {
    fn drop(&mut self) {
        // Teardown releases the backend's sink so no notification outlives
        // the adapter's owner.
        self.backend.unload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        loads: Vec<String>,
        sink: Option<NotificationSink>,
        refuse_play: bool,
    }

    impl AudioTransport for RecordingBackend {
        fn load(&mut self, url: &str, sink: NotificationSink) -> Result<()> {
            self.loads.push(url.to_string());
            self.sink = Some(sink);
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            if self.refuse_play {
                Err(PlaybackError::transport("autoplay blocked"))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {}
        fn seek_to(&mut self, _seconds: f64) {}

        fn unload(&mut self) {
            self.sink = None;
        }
    }

    #[test]
    fn load_advances_generation() {
        let (mut adapter, _rx) = TransportAdapter::new(Box::<RecordingBackend>::default());
        assert_eq!(adapter.generation(), 0);

        let first = adapter.load("https://a.example.com/1.mp3").unwrap();
        let second = adapter.load("https://a.example.com/2.mp3").unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(adapter.generation(), 2);
    }

    #[test]
    fn sink_tags_notifications_with_its_load_generation() {
        let (mut adapter, mut rx) = TransportAdapter::new(Box::<RecordingBackend>::default());
        adapter.load("https://a.example.com/1.mp3").unwrap();

        // Keep the first load's sink alive past the second load, as a slow
        // backend would.
        let stale_sink = NotificationSink {
            generation: adapter.generation(),
            tx: adapter.tx.clone(),
        };
        adapter.load("https://a.example.com/2.mp3").unwrap();

        stale_sink.emit(TransportNotification::TimeUpdated(3.0));
        let tagged = rx.try_recv().unwrap();
        assert_eq!(tagged.generation, 1);
        assert_ne!(tagged.generation, adapter.generation());
    }

    #[test]
    fn refused_play_degrades_silently() {
        let backend = RecordingBackend {
            refuse_play: true,
            ..Default::default()
        };
        let (mut adapter, _rx) = TransportAdapter::new(Box::new(backend));
        assert!(!adapter.try_play());
    }
}

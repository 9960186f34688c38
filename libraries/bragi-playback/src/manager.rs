//! Session manager - core orchestration
//!
//! Owns the session state and the transport adapter, applies the UI
//! commands, and folds transport notifications back into the session. All
//! mutation happens on one logical thread; commands are synchronous and
//! never block, and no error crosses a command boundary. The worst outcome
//! of any failure is an inert track or a paused transport.

use crate::{
    events::SessionEvent,
    restore::{RestoreToken, RestoredSession},
    report::PlayReportQueue,
    session::Session,
    transport::{TaggedNotification, TransportAdapter, TransportNotification},
};
use bragi_core::types::{PlayedTrack, SessionSnapshot, Track, TrackOrigin};
use tracing::{debug, warn};

/// Central playback session management
///
/// Drives the single process-wide [`TransportAdapter`] (injected at
/// construction, never replaced) and queues [`SessionEvent`]s for the
/// embedding shell to drain.
pub struct SessionManager {
    session: Session,
    transport: TransportAdapter,
    reports: Option<PlayReportQueue>,

    // Generation of the load whose notifications are currently accepted;
    // 0 means no live load.
    live_generation: u64,

    // Whether the current load has reported metadata yet; gates direct
    // seeking vs. pending-seek buffering.
    metadata_ready: bool,

    // Counts queue-replacing commands so a restore begun before one of them
    // can be discarded at install time.
    epoch: u64,

    pending_events: Vec<SessionEvent>,
}

impl SessionManager {
    /// Create a manager that owns the given transport
    pub fn new(transport: TransportAdapter) -> Self {
        Self {
            session: Session::new(),
            transport,
            reports: None,
            live_generation: 0,
            metadata_ready: false,
            epoch: 0,
            pending_events: Vec::new(),
        }
    }

    /// Create a manager that also reports track-starts
    pub fn with_reporting(transport: TransportAdapter, reports: PlayReportQueue) -> Self {
        let mut manager = Self::new(transport);
        manager.reports = Some(reports);
        manager
    }

    // ===== Observation =====

    /// Read-only view of the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Project the session onto its durable form
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Drain the queued events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Commands =====

    /// Replace the queue with a single track and attempt playback
    pub fn play_track(&mut self, track: Track) {
        self.epoch += 1;
        self.session.queue.replace(vec![track]);
        self.emit(SessionEvent::QueueChanged { length: 1 });
        self.load_current(true);
    }

    /// Replace the queue wholesale.
    ///
    /// With `autoplay` false the new current track is loaded but the
    /// transport is explicitly paused and `is_playing` forced false, so a
    /// programmatically populated queue never starts audio on its own.
    pub fn set_queue(&mut self, tracks: Vec<Track>, autoplay: bool) {
        self.epoch += 1;
        let length = tracks.len();
        self.session.queue.replace(tracks);
        self.emit(SessionEvent::QueueChanged { length });
        self.load_current(autoplay);
    }

    /// Toggle between playing and paused; no-op on an empty queue
    pub fn toggle_play(&mut self) {
        if self.session.queue.is_empty() {
            return;
        }

        if self.session.is_playing {
            self.transport.pause();
            self.set_playing(false);
        } else if self.transport.try_play() {
            // Resuming does not re-report: reports fire once per track-start.
            self.set_playing(true);
        }
    }

    /// Advance to the next track, or stop at the end of the queue.
    ///
    /// The queue does not wrap; at the last index the transport is stopped,
    /// `is_playing` drops to false, and the index stays put.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.session.queue.is_empty() {
            return;
        }

        if self.session.queue.advance() {
            self.load_current(true);
        } else {
            self.transport.pause();
            self.set_playing(false);
        }
    }

    /// Move back one track, or rewind the current one to the start.
    ///
    /// At index 0 this is not a no-op: the current track restarts at 0.
    pub fn prev(&mut self) {
        if self.session.queue.is_empty() {
            return;
        }

        if self.session.queue.retreat() {
            self.load_current(true);
        } else {
            self.transport.seek_to(0.0);
            self.session.current_time = 0.0;
            self.emit_position();
        }
    }

    /// Jump to a position in seconds.
    ///
    /// Non-finite input is silently ignored. Before the current load has
    /// reported metadata the target is buffered as the pending seek and
    /// applied exactly once when metadata arrives; afterwards it is clamped
    /// to `[0, duration]` and applied immediately.
    pub fn seek(&mut self, seconds: f64) {
        if self.session.queue.is_empty() {
            return;
        }
        if !seconds.is_finite() {
            debug!(seconds, "ignoring non-finite seek");
            return;
        }

        if self.metadata_ready {
            let target = self.clamp_seek(seconds);
            self.transport.seek_to(target);
            self.session.current_time = target;
            self.emit_position();
        } else {
            self.session.pending_seek = Some(seconds.max(0.0));
        }
    }

    /// Empty the queue, stop the transport, and reset all session fields.
    ///
    /// Emits [`SessionEvent::SessionCleared`], which tells the persistence
    /// loop to delete the stored snapshot.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.session.queue.clear();
        self.session.reset_transport_fields();
        self.transport.unload();
        self.live_generation = 0;
        self.metadata_ready = false;
        self.emit(SessionEvent::SessionCleared);
    }

    // ===== Transport notifications =====

    /// Fold one transport notification into the session.
    ///
    /// Notifications must be handed over in emission order. A notification
    /// tagged with a superseded load generation is discarded.
    pub fn handle_notification(&mut self, tagged: TaggedNotification) {
        if tagged.generation != self.live_generation {
            debug!(
                generation = tagged.generation,
                live = self.live_generation,
                "dropping stale transport notification"
            );
            return;
        }

        match tagged.notification {
            TransportNotification::TimeUpdated(seconds) => {
                if seconds.is_finite() {
                    self.session.current_time = seconds.max(0.0);
                    self.emit_position();
                }
            }
            TransportNotification::MetadataReady(duration) => {
                self.metadata_ready = true;
                if duration.is_finite() && duration > 0.0 {
                    self.session.duration = duration;
                }
                if let Some(target) = self.session.pending_seek.take() {
                    let target = self.clamp_seek(target);
                    self.transport.seek_to(target);
                    self.session.current_time = target;
                }
                self.emit_position();
            }
            TransportNotification::Ended => self.next(),
            TransportNotification::PlaybackStarted => self.set_playing(true),
            TransportNotification::PlaybackPaused => self.set_playing(false),
        }
    }

    // ===== Restore =====

    /// Begin a restore attempt, capturing the current command epoch
    pub fn begin_restore(&self) -> RestoreToken {
        RestoreToken { epoch: self.epoch }
    }

    /// Install a restored session.
    ///
    /// Returns false (and changes nothing) when a queue-replacing command
    /// arrived after [`begin_restore`](Self::begin_restore): explicit
    /// commands always win over a slow restore.
    pub fn install_restored(&mut self, token: RestoreToken, restored: RestoredSession) -> bool {
        if token.epoch != self.epoch {
            debug!("discarding restored session superseded by an explicit command");
            return false;
        }
        if restored.queue.is_empty() {
            return false;
        }

        let length = restored.queue.len();
        self.session
            .queue
            .install(restored.queue, restored.current_index);
        self.emit(SessionEvent::SessionRestored { length });

        // Restored autoplay is best-effort: a missing URL or a refused play
        // leaves the session paused with no error surfaced.
        self.load_current(restored.resume_playback);

        // load_current cleared pending state for the fresh load; the
        // persisted position becomes the seek applied at metadata-ready.
        self.session.pending_seek = restored.pending_seek;
        true
    }

    // ===== Internals =====

    /// Load the current track into the transport and optionally attempt play.
    ///
    /// A track with no `audio_url` (or an empty queue) leaves the transport
    /// paused and the session inert; this is never an error.
    fn load_current(&mut self, attempt_play: bool) {
        self.metadata_ready = false;
        self.session.pending_seek = None;
        self.session.current_time = 0.0;

        let Some(track) = self.session.queue.current().cloned() else {
            self.transport.pause();
            self.live_generation = 0;
            self.session.duration = 0.0;
            self.set_playing(false);
            return;
        };

        self.session.duration = track.fallback_duration_secs();

        let Some(url) = track.audio_url.as_deref() else {
            self.transport.pause();
            self.live_generation = 0;
            self.set_playing(false);
            self.emit_track_changed(&track);
            return;
        };

        match self.transport.load(url) {
            Ok(generation) => {
                self.live_generation = generation;
                self.emit_track_changed(&track);

                if attempt_play {
                    if self.transport.try_play() {
                        self.set_playing(true);
                        self.report_track_start(&track);
                    } else {
                        self.set_playing(false);
                    }
                } else {
                    self.transport.pause();
                    self.set_playing(false);
                }
            }
            Err(error) => {
                warn!(track_id = %track.id, %error, "transport refused source; track is inert");
                self.transport.pause();
                self.live_generation = self.transport.generation();
                self.metadata_ready = false;
                self.set_playing(false);
                self.emit_track_changed(&track);
            }
        }
    }

    /// Report one track-start, externally-hosted tracks only
    fn report_track_start(&mut self, track: &Track) {
        if track.origin != TrackOrigin::ExternallyHosted {
            return;
        }
        if let Some(reports) = &self.reports {
            reports.enqueue(PlayedTrack::starting_now(track));
        }
    }

    fn clamp_seek(&self, seconds: f64) -> f64 {
        if self.session.duration > 0.0 {
            seconds.clamp(0.0, self.session.duration)
        } else {
            seconds.max(0.0)
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.session.is_playing != playing {
            self.session.is_playing = playing;
            self.emit(SessionEvent::StateChanged {
                is_playing: playing,
            });
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.pending_events.push(event);
    }

    fn emit_track_changed(&mut self, track: &Track) {
        self.emit(SessionEvent::TrackChanged {
            track_id: track.id.clone(),
            index: self.session.queue.current_index(),
        });
    }

    fn emit_position(&mut self) {
        self.emit(SessionEvent::PositionChanged {
            position_secs: self.session.current_time,
            duration_secs: self.session.duration,
        });
    }
}

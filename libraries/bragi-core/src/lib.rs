//! Bragi Core
//!
//! Platform-agnostic core types, traits, and error handling for the Bragi
//! playback session.
//!
//! This crate is the shared foundation of the playback workspace:
//! - **Domain Types**: [`Track`], [`SessionSnapshot`], [`PlayedTrack`]
//! - **Collaborator Traits**: [`ResourceResolver`], [`PlayReporter`],
//!   [`SnapshotStore`]
//! - **Error Handling**: unified [`BragiError`] and [`Result`] types
//!
//! The traits describe the external services the session core consumes; the
//! session logic itself lives in `bragi-playback`, the SQLite snapshot store
//! in `bragi-storage`, and HTTP implementations of the collaborator traits in
//! `bragi-api-client`.
//!
//! # Example
//!
//! ```rust
//! use bragi_core::types::{Track, TrackOrigin};
//!
//! let track = Track::new("t1", "My Favorite Song", "Some Artist", TrackOrigin::ExternallyHosted)
//!     .with_audio_url("https://cdn.example.com/preview/t1.mp3");
//!
//! assert!(track.audio_url.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{BragiError, Result};
pub use traits::{PlayReporter, ResourceResolver, SnapshotStore};
pub use types::{PlayedTrack, SessionSnapshot, Track, TrackOrigin, SNAPSHOT_KEY};

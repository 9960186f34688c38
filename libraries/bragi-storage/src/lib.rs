//! Bragi Storage
//!
//! SQLite-backed durable storage for the Bragi playback session snapshot.
//!
//! The playback core persists exactly one keyed entry (see
//! [`bragi_core::types::SNAPSHOT_KEY`]); this crate owns that entry. It
//! never interprets the session beyond the tolerant JSON codec: an absent or
//! unreadable value is "no saved session", not an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use bragi_storage::SqliteSnapshotStore;
//! use bragi_core::SnapshotStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteSnapshotStore::open("sqlite://bragi.db").await?;
//!
//! let restored = store.load().await?;
//! if restored.is_none() {
//!     // fresh start
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub use error::StorageError;
pub use store::SqliteSnapshotStore;

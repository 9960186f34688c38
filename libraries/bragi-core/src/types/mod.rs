//! Domain types shared across the Bragi workspace

mod play;
mod snapshot;
mod track;

pub use play::PlayedTrack;
pub use snapshot::{SessionSnapshot, SNAPSHOT_KEY};
pub use track::{Track, TrackOrigin};

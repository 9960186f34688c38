//! Bragi API Client
//!
//! HTTP implementations of the collaborator traits the playback core
//! consumes:
//!
//! - [`ResourceResolver`](bragi_core::ResourceResolver): exchanges an
//!   uploaded track's storage path for a fresh signed URL
//!   (`GET /api/uploads/download?path=…`)
//! - [`PlayReporter`](bragi_core::PlayReporter): records track-starts in the
//!   play log (`POST /api/plays`)
//!
//! Both are consumed by `bragi-playback` as trait objects; nothing in the
//! playback core knows it is talking HTTP.

#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{ApiClientError, Result};
pub use types::{DownloadUrlResponse, PlayReportBody};

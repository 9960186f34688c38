//! HTTP client for the Bragi backend API.
//!
//! Implements the two collaborator traits the playback core consumes:
//! [`ResourceResolver`] over `GET /api/uploads/download` and [`PlayReporter`]
//! over `POST /api/plays`.

use crate::error::{ApiClientError, Result};
use crate::types::{DownloadUrlResponse, PlayReportBody};
use async_trait::async_trait;
use bragi_core::{PlayReporter, PlayedTrack, ResourceResolver};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Client for the Bragi backend API.
///
/// # Example
///
/// ```ignore
/// use bragi_api_client::ApiClient;
///
/// let client = ApiClient::new("https://bragi.example.com")?;
///
/// // Re-sign an uploaded track's URL
/// let url = client.resolve_download_url("user-1/song.mp3").await?;
/// ```
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = base_url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Bragi/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange an upload's storage path for a fresh signed URL.
    pub async fn resolve_download_url(&self, path: &str) -> Result<String> {
        let url = format!("{}/api/uploads/download", self.base_url);

        debug!(%path, "resolving upload download url");

        let response = self
            .http
            .get(&url)
            .query(&[("path", path)])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ApiClientError::ServerUnreachable(e.to_string())
                } else {
                    ApiClientError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: DownloadUrlResponse = response.json().await.map_err(|e| {
            ApiClientError::ParseError(format!("Failed to parse download url response: {e}"))
        })?;

        body.url.ok_or_else(|| {
            ApiClientError::ParseError("download url response carried no url".into())
        })
    }

    /// Record one track-start in the play log.
    pub async fn log_play(&self, played: &PlayedTrack) -> Result<()> {
        let url = format!("{}/api/plays", self.base_url);
        let body = PlayReportBody::from(played);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ApiClientError::ServerUnreachable(e.to_string())
                } else {
                    ApiClientError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%status, "play log rejected");
            return Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        debug!(track_id = %played.track_id, "play logged");
        Ok(())
    }
}

#[async_trait]
impl ResourceResolver for ApiClient {
    async fn resolve(&self, track_id: &str) -> bragi_core::Result<String> {
        self.resolve_download_url(track_id)
            .await
            .map_err(|e| bragi_core::BragiError::resolve(track_id, e.to_string()))
    }
}

#[async_trait]
impl PlayReporter for ApiClient {
    async fn report(&self, played: &PlayedTrack) -> bragi_core::Result<()> {
        self.log_play(played)
            .await
            .map_err(|e| bragi_core::BragiError::report(e.to_string()))
    }
}

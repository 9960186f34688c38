//! Integration tests for the Bragi API client against a mock server.

use bragi_api_client::{ApiClient, ApiClientError};
use bragi_core::types::{Track, TrackOrigin};
use bragi_core::{PlayReporter, PlayedTrack, ResourceResolver};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn played(track_id: &str) -> PlayedTrack {
    let track = Track::new(track_id, "Song", "Artist", TrackOrigin::ExternallyHosted)
        .with_audio_url("https://cdn.example.com/preview.mp3")
        .with_duration(std::time::Duration::from_millis(30_000));
    PlayedTrack::starting_now(&track)
}

#[tokio::test]
async fn resolve_returns_fresh_signed_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/uploads/download"))
        .and(query_param("path", "user-1/song.mp3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "url": "https://signed.example.com/fresh" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let url = client
        .resolve_download_url("user-1/song.mp3")
        .await
        .unwrap();
    assert_eq!(url, "https://signed.example.com/fresh");
}

#[tokio::test]
async fn resolve_maps_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/uploads/download"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({ "error": "Forbidden" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client
        .resolve_download_url("someone-else/song.mp3")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiClientError::ServerError { status: 403, .. }));
}

#[tokio::test]
async fn resolve_without_url_field_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/uploads/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.resolve_download_url("user-1/a.mp3").await.unwrap_err();
    assert!(matches!(err, ApiClientError::ParseError(_)));
}

#[tokio::test]
async fn resolver_trait_wraps_failures_with_track_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/uploads/download"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = ResourceResolver::resolve(&client, "user-1/gone.mp3")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("user-1/gone.mp3"));
}

#[tokio::test]
async fn report_posts_the_play_log_insert_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/plays"))
        .and(body_partial_json(serde_json::json!({
            "track_id": "t1",
            "track_name": "Song",
            "artist_name": "Artist",
            "preview_url": "https://cdn.example.com/preview.mp3",
            "duration_ms": 30_000,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    client.log_play(&played("t1")).await.unwrap();
}

#[tokio::test]
async fn report_failure_surfaces_as_ignorable_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/plays"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = PlayReporter::report(&client, &played("t1")).await.unwrap_err();
    assert!(matches!(err, bragi_core::BragiError::Report(_)));
}

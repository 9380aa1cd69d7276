//! Integration tests for run-level orchestration
//!
//! Verifies failure isolation between users and summary accounting
//! against a shared mock provider.

mod common;

use common::{credential, test_config};
use rotify_metrics_client::MetricsClient;
use rotify_spotify_client::SpotifyClient;
use rotify_test_utils::{MockMetricsServer, MockSpotifyServer, PlaylistFixture, TrackFixture};
use rotify_worker::orchestrator;

const TOMORROW_ID: &str = "pl-tomorrow";
const TODAY_ID: &str = "pl-today";

/// Mount the shared API surface every authenticated user sees
async fn mount_shared_api(server: &MockSpotifyServer, queued: &[TrackFixture]) {
    server.mock_current_user("shared-user").await;
    server
        .mock_playlists(&[
            PlaylistFixture::new(TOMORROW_ID, "Tomorrow", queued.len()),
            PlaylistFixture::new(TODAY_ID, "Today", 0),
        ])
        .await;
    server.mock_playlist_items(TOMORROW_ID, queued, 100).await;
    server.mock_mutations_success(TOMORROW_ID).await;
    server.mock_mutations_success(TODAY_ID).await;
}

#[tokio::test]
async fn test_one_revoked_credential_does_not_stop_the_run() {
    let spotify = MockSpotifyServer::start().await;
    let metrics = MockMetricsServer::start().await;

    // alice and bob authenticate; carol's refresh token is rejected.
    // The specific token mocks are mounted before the catch-all failure
    // so they take precedence.
    spotify.mock_token_success_for("rt-alice").await;
    spotify.mock_token_success_for("rt-bob").await;
    spotify.mock_token_failure().await;
    mount_shared_api(&spotify, &TrackFixture::catalog_batch(3)).await;
    metrics.mock_publish_success().await;

    let config = test_config(&spotify.url(), Some(metrics.sink_url()));
    let client = SpotifyClient::new(config.spotify()).unwrap();
    let metrics_client = MetricsClient::new(config.metrics().unwrap()).unwrap();

    let credentials = vec![
        credential("alice", "rt-alice"),
        credential("bob", "rt-bob"),
        credential("carol", "rt-carol"),
    ];
    let summary =
        orchestrator::run_all(&client, Some(&metrics_client), &config, credentials).await;

    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.rotated, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 1);
    assert!(summary.accounted_for());

    // One metric per successful rotation, none for the failed user
    let points = metrics.published_points().await;
    assert_eq!(points.len(), 2);
    let mut users: Vec<String> = points
        .iter()
        .map(|p| p["dimensions"][0]["value"].as_str().unwrap().to_string())
        .collect();
    users.sort();
    assert_eq!(users, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_empty_queues_count_as_skipped() {
    let spotify = MockSpotifyServer::start().await;
    spotify.mock_token_success().await;
    mount_shared_api(&spotify, &[]).await;

    let config = test_config(&spotify.url(), None);
    let client = SpotifyClient::new(config.spotify()).unwrap();

    let credentials = vec![credential("alice", "rt-alice"), credential("bob", "rt-bob")];
    let summary = orchestrator::run_all(&client, None, &config, credentials).await;

    assert_eq!(summary.dispatched, 2);
    assert_eq!(summary.rotated, 0);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);
    assert!(spotify.mutation_calls().await.is_empty());
}

#[tokio::test]
async fn test_empty_credential_list_is_a_noop() {
    let spotify = MockSpotifyServer::start().await;

    let config = test_config(&spotify.url(), None);
    let client = SpotifyClient::new(config.spotify()).unwrap();

    let summary = orchestrator::run_all(&client, None, &config, Vec::new()).await;

    assert_eq!(summary.dispatched, 0);
    assert!(summary.accounted_for());
    assert!(spotify.request_log().await.is_empty());
}

#[tokio::test]
async fn test_serial_concurrency_still_processes_everyone() {
    let spotify = MockSpotifyServer::start().await;
    spotify.mock_token_success().await;
    mount_shared_api(&spotify, &TrackFixture::catalog_batch(2)).await;

    let mut config = test_config(&spotify.url(), None);
    config.max_concurrent_users = 1;
    let client = SpotifyClient::new(config.spotify()).unwrap();

    let credentials = vec![
        credential("alice", "rt-alice"),
        credential("bob", "rt-bob"),
        credential("carol", "rt-carol"),
    ];
    let summary = orchestrator::run_all(&client, None, &config, credentials).await;

    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.rotated, 3);
    assert!(summary.accounted_for());
}

#[tokio::test]
async fn test_zero_concurrency_is_clamped_not_stuck() {
    let spotify = MockSpotifyServer::start().await;
    spotify.mock_token_success().await;
    mount_shared_api(&spotify, &[]).await;

    let mut config = test_config(&spotify.url(), None);
    config.max_concurrent_users = 0;
    let client = SpotifyClient::new(config.spotify()).unwrap();

    let summary =
        orchestrator::run_all(&client, None, &config, vec![credential("alice", "rt")]).await;
    assert_eq!(summary.skipped, 1);
}

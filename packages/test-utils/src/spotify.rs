//! Mock Spotify server for testing rotation jobs
//!
//! Provides a [`MockSpotifyServer`] that simulates the accounts service
//! and the Web API endpoints the rotation worker touches, plus fixtures
//! for playlists and tracks and helpers to inspect the mutation calls a
//! test produced.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default access token handed out by the mock token endpoint
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// Mock Spotify server
///
/// Wraps a [`wiremock::MockServer`] and exposes convenience methods for
/// the endpoint family the rotation worker consumes. Point both the
/// accounts and API base URLs of a `SpotifyConfig` at [`url`](Self::url).
pub struct MockSpotifyServer {
    server: MockServer,
}

impl MockSpotifyServer {
    /// Start a new mock Spotify server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get a reference to the underlying mock server for custom setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mount a mock for successful token refresh
    pub async fn mock_token_success(&self) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": MOCK_ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for token refresh rejection (revoked/invalid grant)
    pub async fn mock_token_failure(&self) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Refresh token revoked"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for token refresh succeeding only for one refresh token
    ///
    /// Other refresh tokens get an invalid_grant rejection. Used for
    /// failure-isolation tests where one user's credential is broken.
    pub async fn mock_token_success_for(&self, refresh_token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(wiremock::matchers::body_string_contains(format!(
                "refresh_token={}",
                refresh_token
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": format!("{}-{}", MOCK_ACCESS_TOKEN, refresh_token),
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for the current-user profile
    pub async fn mock_current_user(&self, user_id: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": user_id,
                "display_name": user_id
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for a session the provider has no profile for
    pub async fn mock_current_user_missing(&self) {
        Mock::given(method("GET"))
            .and(path("/v1/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for the user's playlist library (single page)
    pub async fn mock_playlists(&self, playlists: &[PlaylistFixture]) {
        let items: Vec<serde_json::Value> = playlists.iter().map(|p| p.to_json()).collect();
        Mock::given(method("GET"))
            .and(path("/v1/me/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": items,
                "next": null,
                "total": playlists.len()
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for playlist creation, keyed on the playlist name
    pub async fn mock_create_playlist(&self, owner_id: &str, name: &str, created_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v1/users/{}/playlists", owner_id)))
            .and(body_partial_json(json!({ "name": name })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": created_id,
                "name": name,
                "tracks": { "total": 0 }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount paginated item listings for a playlist
    ///
    /// Tracks are split into pages of `page_size`; every page except the
    /// last carries a `next` link back to this server. An empty track
    /// slice mounts a single empty page.
    pub async fn mock_playlist_items(
        &self,
        playlist_id: &str,
        tracks: &[TrackFixture],
        page_size: usize,
    ) {
        let pages: Vec<&[TrackFixture]> = if tracks.is_empty() {
            vec![&[]]
        } else {
            tracks.chunks(page_size).collect()
        };
        let page_count = pages.len();

        for (i, page) in pages.into_iter().enumerate() {
            let offset = i * page_size;
            let next = if i + 1 < page_count {
                Some(format!(
                    "{}/v1/playlists/{}/tracks?limit={}&offset={}",
                    self.server.uri(),
                    playlist_id,
                    page_size,
                    (i + 1) * page_size
                ))
            } else {
                None
            };
            let items: Vec<serde_json::Value> = page.iter().map(|t| t.to_json()).collect();

            Mock::given(method("GET"))
                .and(path(format!("/v1/playlists/{}/tracks", playlist_id)))
                .and(query_param("offset", offset.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "items": items,
                    "next": next,
                    "total": tracks.len()
                })))
                .mount(&self.server)
                .await;
        }
    }

    /// Mount success responses for all three mutation verbs on a playlist
    pub async fn mock_mutations_success(&self, playlist_id: &str) {
        for verb in ["PUT", "POST", "DELETE"] {
            Mock::given(method(verb))
                .and(path(format!("/v1/playlists/{}/tracks", playlist_id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "snapshot_id": "snap"
                })))
                .mount(&self.server)
                .await;
        }
    }

    /// Mount a failure for one mutation verb on a playlist
    pub async fn mock_mutation_failure(&self, verb: &str, playlist_id: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(format!("/v1/playlists/{}/tracks", playlist_id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "status": status, "message": "mutation failed" }
            })))
            .mount(&self.server)
            .await;
    }

    /// All mutation calls received so far, in arrival order
    pub async fn mutation_calls(&self) -> Vec<MutationCall> {
        let requests = self.server.received_requests().await.unwrap_or_default();
        requests
            .iter()
            .filter_map(|req| {
                let path = req.url.path();
                let playlist_id = path
                    .strip_prefix("/v1/playlists/")
                    .and_then(|rest| rest.strip_suffix("/tracks"))?;
                let body: serde_json::Value = serde_json::from_slice(&req.body).ok()?;
                let (kind, uris) = match req.method.to_string().as_str() {
                    "PUT" => (MutationKind::Replace, string_array(&body["uris"])),
                    "POST" => (MutationKind::Add, string_array(&body["uris"])),
                    "DELETE" => (
                        MutationKind::Remove,
                        body["tracks"]
                            .as_array()
                            .map(|tracks| {
                                tracks
                                    .iter()
                                    .filter_map(|t| t["uri"].as_str().map(String::from))
                                    .collect()
                            })
                            .unwrap_or_default(),
                    ),
                    _ => return None,
                };
                Some(MutationCall {
                    kind,
                    playlist_id: playlist_id.to_string(),
                    uris,
                })
            })
            .collect()
    }

    /// Method/path log of every request received so far, in arrival order
    pub async fn request_log(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| (req.method.to_string(), req.url.path().to_string()))
            .collect()
    }
}

fn string_array(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// The verb of a recorded mutation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Replace,
    Add,
    Remove,
}

/// One recorded mutation call against a playlist
#[derive(Debug, Clone)]
pub struct MutationCall {
    pub kind: MutationKind,
    pub playlist_id: String,
    pub uris: Vec<String>,
}

/// Fixture for a playlist in the user's library
#[derive(Debug, Clone)]
pub struct PlaylistFixture {
    pub id: String,
    pub name: String,
    pub total: usize,
}

impl PlaylistFixture {
    pub fn new(id: &str, name: &str, total: usize) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            total,
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
            "tracks": { "total": self.total }
        })
    }
}

/// Fixture for one playlist item
#[derive(Debug, Clone)]
pub struct TrackFixture {
    /// Catalog id; `None` models a local/non-catalog track
    pub id: Option<String>,
    pub uri: String,
}

impl TrackFixture {
    /// A catalog track eligible for rotation
    pub fn catalog(n: usize) -> Self {
        Self {
            id: Some(format!("track{}", n)),
            uri: format!("spotify:track:{}", n),
        }
    }

    /// A local-file track with a null id, ineligible for rotation
    pub fn local(n: usize) -> Self {
        Self {
            id: None,
            uri: format!("spotify:local:{}", n),
        }
    }

    /// A batch of sequential catalog tracks
    pub fn catalog_batch(count: usize) -> Vec<Self> {
        (0..count).map(Self::catalog).collect()
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "track": {
                "id": self.id,
                "uri": self.uri
            }
        })
    }
}

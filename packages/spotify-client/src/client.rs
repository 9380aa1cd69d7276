//! Spotify Web API client implementation

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response};
use rotify_shared_config::SpotifyConfig;
use tracing::debug;

use crate::error::{SpotifyError, SpotifyResult};
use crate::models::{
    CreatePlaylistRequest, Page, Playlist, PlaylistItem, RemoveTracksRequest, TokenResponse,
    UriList, UserProfile,
};

/// Provider-imposed maximum number of track references per mutation call
pub const MAX_ITEMS_PER_CALL: usize = 100;

/// Page size requested when listing playlists
const PLAYLIST_PAGE_LIMIT: u32 = 50;

/// Page size requested when listing playlist items
const TRACK_PAGE_LIMIT: u32 = 100;

/// Maximum error body size to keep error messages bounded
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Spotify application client
///
/// Holds the application credentials and exchanges per-user refresh
/// tokens for authenticated [`UserClient`] handles. One `SpotifyClient`
/// is shared across the run; each user task gets its own `UserClient`.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    config: SpotifyConfig,
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("client_id", &self.config.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("api_url", &self.config.api_url)
            .finish()
    }
}

impl SpotifyClient {
    /// Create a new Spotify client from configuration
    pub fn new(config: &SpotifyConfig) -> SpotifyResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("rotify/0.1")
            .build()
            .map_err(SpotifyError::Http)?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Create a client with a custom HTTP client (for testing)
    pub fn with_client(config: &SpotifyConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: config.clone(),
        }
    }

    /// Exchange a user's refresh token for an authenticated session
    ///
    /// # Errors
    /// - `SpotifyError::Auth` if the accounts service rejects the exchange
    /// - `SpotifyError::Http` / `SpotifyError::Timeout` on transport failure
    pub async fn authenticate(&self, refresh_token: &str) -> SpotifyResult<UserClient> {
        if refresh_token.trim().is_empty() {
            return Err(SpotifyError::InvalidInput(
                "refresh token cannot be empty".to_string(),
            ));
        }

        debug!("Refreshing Spotify access token");

        let response = self
            .http_client
            .post(self.config.token_url())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = capped_body(response).await;
            return Err(SpotifyError::Auth { status, message });
        }

        let text = response.text().await.map_err(SpotifyError::Http)?;
        let token: TokenResponse = serde_json::from_str(&text)?;

        Ok(UserClient {
            http_client: self.http_client.clone(),
            config: self.config.clone(),
            access_token: token.access_token,
        })
    }
}

/// Per-user authenticated API handle
///
/// Owned exclusively by one user task for one rotation pass; carries
/// that user's short-lived access token.
#[derive(Clone)]
pub struct UserClient {
    http_client: Client,
    config: SpotifyConfig,
    access_token: String,
}

impl fmt::Debug for UserClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserClient")
            .field("api_url", &self.config.api_url)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl UserClient {
    /// Fetch the authenticated user's profile
    ///
    /// Returns `Ok(None)` when the provider reports no profile for the
    /// session (missing body or 404), which callers treat as an invalid
    /// user rather than a transport failure.
    pub async fn current_user(&self) -> SpotifyResult<Option<UserProfile>> {
        let response = self.get(&self.config.api_endpoint("me")).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = error_for_status(response).await?;

        let text = response.text().await.map_err(SpotifyError::Http)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let profile: Option<UserProfile> = serde_json::from_str(&text)?;
        Ok(profile)
    }

    /// List every playlist in the user's library, following pagination
    /// until exhaustion
    pub async fn list_all_playlists(&self) -> SpotifyResult<Vec<Playlist>> {
        let first = format!(
            "{}?limit={}&offset=0",
            self.config.api_endpoint("me/playlists"),
            PLAYLIST_PAGE_LIMIT
        );
        let playlists = self.fetch_all_pages(first).await?;
        debug!(count = playlists.len(), "Fetched user playlists");
        Ok(playlists)
    }

    /// Create a playlist owned by the given user
    pub async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
    ) -> SpotifyResult<Playlist> {
        debug!(owner = %owner_id, name = %name, "Creating playlist");

        let url = self
            .config
            .api_endpoint(&format!("users/{}/playlists", owner_id));
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&CreatePlaylistRequest {
                name,
                description,
                public: false,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = error_for_status(response).await?;
        let text = response.text().await.map_err(SpotifyError::Http)?;
        let playlist: Playlist = serde_json::from_str(&text)?;
        Ok(playlist)
    }

    /// Retrieve the full ordered item listing of a playlist
    ///
    /// Follows the provider's `next` links until no further page exists
    /// and returns the concatenation in page order, materialized. Callers
    /// that need the count and repeated slicing (the rotation does) get
    /// both from the returned `Vec`.
    pub async fn list_all_playlist_items(
        &self,
        playlist_id: &str,
    ) -> SpotifyResult<Vec<PlaylistItem>> {
        let first = format!(
            "{}?limit={}&offset=0",
            self.config
                .api_endpoint(&format!("playlists/{}/tracks", playlist_id)),
            TRACK_PAGE_LIMIT
        );
        let items = self.fetch_all_pages(first).await?;
        debug!(
            playlist = %playlist_id,
            count = items.len(),
            "Fetched playlist items"
        );
        Ok(items)
    }

    /// Replace a playlist's entire contents with the given uris
    ///
    /// # Errors
    /// `SpotifyError::InvalidInput` if more than [`MAX_ITEMS_PER_CALL`]
    /// uris are supplied.
    pub async fn replace_items(&self, playlist_id: &str, uris: &[String]) -> SpotifyResult<()> {
        validate_batch(uris)?;
        let url = self
            .config
            .api_endpoint(&format!("playlists/{}/tracks", playlist_id));
        let response = self
            .http_client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&UriList { uris })
            .send()
            .await
            .map_err(map_transport_error)?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Append the given uris to a playlist
    pub async fn add_items(&self, playlist_id: &str, uris: &[String]) -> SpotifyResult<()> {
        validate_batch(uris)?;
        let url = self
            .config
            .api_endpoint(&format!("playlists/{}/tracks", playlist_id));
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&UriList { uris })
            .send()
            .await
            .map_err(map_transport_error)?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Remove all occurrences of the given uris from a playlist
    pub async fn remove_items(&self, playlist_id: &str, uris: &[String]) -> SpotifyResult<()> {
        validate_batch(uris)?;
        let url = self
            .config
            .api_endpoint(&format!("playlists/{}/tracks", playlist_id));
        let response = self
            .http_client
            .delete(url)
            .bearer_auth(&self.access_token)
            .json(&RemoveTracksRequest::from_uris(uris))
            .send()
            .await
            .map_err(map_transport_error)?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Issue an authenticated GET without status handling
    async fn get(&self, url: &str) -> SpotifyResult<Response> {
        self.http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// Collect every item of a paginated listing, page by page
    async fn fetch_all_pages<T: serde::de::DeserializeOwned>(
        &self,
        first_url: String,
    ) -> SpotifyResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next {
            let response = self.get(&url).await?;
            let response = error_for_status(response).await?;
            let text = response.text().await.map_err(SpotifyError::Http)?;
            let page: Page<T> = serde_json::from_str(&text)?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }
}

/// Reject mutation batches exceeding the provider limit
fn validate_batch(uris: &[String]) -> SpotifyResult<()> {
    if uris.len() > MAX_ITEMS_PER_CALL {
        return Err(SpotifyError::InvalidInput(format!(
            "mutation call carries {} uris, provider limit is {}",
            uris.len(),
            MAX_ITEMS_PER_CALL
        )));
    }
    Ok(())
}

fn map_transport_error(e: reqwest::Error) -> SpotifyError {
    if e.is_timeout() {
        SpotifyError::Timeout
    } else {
        SpotifyError::Http(e)
    }
}

/// Turn a non-success response into `SpotifyError::Api`
async fn error_for_status(response: Response) -> SpotifyResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = capped_body(response).await;
    Err(SpotifyError::Api { status, message })
}

async fn capped_body(response: Response) -> String {
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY_SIZE {
        body.truncate(MAX_ERROR_BODY_SIZE);
    }
    body
}

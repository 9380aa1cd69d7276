//! Spotify Web API response models

use serde::{Deserialize, Serialize};

/// The authenticated user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Spotify user id (owner id for playlist creation)
    pub id: String,
    /// Display name, if the user has set one
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A playlist in the user's library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// Opaque playlist id
    pub id: String,
    /// Playlist name (matched exactly during resolution)
    pub name: String,
    /// Track counts as reported by the provider
    #[serde(default)]
    pub tracks: PlaylistTracksRef,
}

/// Track-count stub embedded in playlist objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    /// Number of items the provider reports for the playlist
    #[serde(default)]
    pub total: u32,
}

/// One entry of a playlist's item listing
///
/// The `track` field is null for entries the provider can no longer
/// resolve; the rotation excludes those.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<PlaylistTrack>,
}

/// A track reference inside a playlist item
///
/// `id` is null for local files and other non-catalog tracks; those are
/// not eligible for rotation even though they carry a uri.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub uri: String,
}

/// One page of a paginated listing
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
    /// Absolute URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    #[allow(dead_code)] // Reported by the provider, not consumed
    pub total: u32,
}

/// Token refresh response from the accounts service
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)] // Required for serde deserialization, not used in code
    pub token_type: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub expires_in: Option<u64>,
}

/// Request body for playlist creation
#[derive(Debug, Serialize)]
pub(crate) struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub public: bool,
}

/// Request body for replace/add mutations
#[derive(Debug, Serialize)]
pub(crate) struct UriList<'a> {
    pub uris: &'a [String],
}

/// Request body for remove mutations
#[derive(Debug, Serialize)]
pub(crate) struct RemoveTracksRequest {
    pub tracks: Vec<RemoveTrackRef>,
}

/// One track reference in a remove body
#[derive(Debug, Serialize)]
pub(crate) struct RemoveTrackRef {
    pub uri: String,
}

impl RemoveTracksRequest {
    pub fn from_uris(uris: &[String]) -> Self {
        Self {
            tracks: uris
                .iter()
                .map(|uri| RemoveTrackRef { uri: uri.clone() })
                .collect(),
        }
    }
}

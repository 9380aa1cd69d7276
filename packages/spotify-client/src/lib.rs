//! Spotify Web API client for rotify
//!
//! This crate provides the provider-facing client used by the rotation
//! worker:
//! - refresh-token exchange for per-user access tokens
//! - profile lookup
//! - playlist listing and creation
//! - full, materialized playlist item listings (pagination followed to
//!   exhaustion)
//! - replace/add/remove mutations, each bounded by the provider's
//!   100-item limit
//!
//! # Example
//!
//! ```rust,no_run
//! use rotify_shared_config::SpotifyConfig;
//! use rotify_spotify_client::SpotifyClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SpotifyConfig::new("client-id", "client-secret");
//! let client = SpotifyClient::new(&config)?;
//!
//! let user = client.authenticate("stored-refresh-token").await?;
//! let playlists = user.list_all_playlists().await?;
//! for playlist in playlists {
//!     println!("{} ({} tracks)", playlist.name, playlist.tracks.total);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::{SpotifyClient, UserClient, MAX_ITEMS_PER_CALL};
pub use error::{SpotifyError, SpotifyResult};
pub use models::{Playlist, PlaylistItem, PlaylistTrack, PlaylistTracksRef, UserProfile};

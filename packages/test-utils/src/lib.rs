//! Shared test utilities for the rotify workspace
//!
//! This crate provides mock implementations of the external services the
//! rotation worker depends on, for testing without network dependencies.
//!
//! # Mock Services
//!
//! - [`MockSpotifyServer`] - Mock accounts service + Web API for rotation tests
//! - [`MockMetricsServer`] - Mock HTTP metrics sink
//!
//! # Example
//!
//! ```rust,ignore
//! use rotify_test_utils::{MockSpotifyServer, PlaylistFixture, TrackFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let spotify = MockSpotifyServer::start().await;
//!     spotify.mock_token_success().await;
//!     spotify.mock_current_user("alice").await;
//!
//!     // Point your SpotifyConfig base URLs at spotify.url()
//! }
//! ```

mod metrics;
mod spotify;

pub use metrics::MockMetricsServer;
pub use spotify::{
    MockSpotifyServer, MutationCall, MutationKind, PlaylistFixture, TrackFixture,
    MOCK_ACCESS_TOKEN,
};

//! Spotify API error types

use thiserror::Error;

/// Spotify API client errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Invalid input provided to an API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse Spotify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Token refresh rejected by the accounts service
    #[error("Spotify auth error {status}: {message}")]
    Auth { status: u16, message: String },

    /// Web API returned a non-success status
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Request timeout
    #[error("Request to Spotify timed out")]
    Timeout,
}

/// Result type for Spotify operations
pub type SpotifyResult<T> = Result<T, SpotifyError>;

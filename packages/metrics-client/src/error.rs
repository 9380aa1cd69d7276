//! Metrics sink error types

use thiserror::Error;

/// Metrics client errors
///
/// Publish failures are deliberately not swallowed here; the rotation
/// worker decides how a failed emission affects the user's pass.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// HTTP request failed
    #[error("HTTP request to metrics sink failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Sink returned a non-success status
    #[error("metrics sink error {status}: {message}")]
    Api { status: u16, message: String },

    /// Request timeout
    #[error("request to metrics sink timed out")]
    Timeout,
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

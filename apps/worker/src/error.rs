//! Error handling for the rotation worker
//!
//! Per-user failures are values, not exceptions: each user task returns a
//! `Result` the orchestrator pattern-matches exactly once, logs with the
//! user's key, and discards. Nothing here aborts the run as a whole.

use rotify_metrics_client::MetricsError;
use rotify_spotify_client::SpotifyError;
use thiserror::Error;

/// Rotation worker error type
#[derive(Error, Debug)]
pub enum RotationError {
    /// Provider returned no profile for an authenticated session
    #[error("provider returned no profile for user {user}")]
    InvalidUser { user: String },

    /// A provider call (auth, pagination or mutation) failed
    ///
    /// Aborts the remaining batches for this user; completed batches are
    /// not rolled back.
    #[error("provider call failed: {0}")]
    Provider(#[from] SpotifyError),

    /// Metric emission failed
    ///
    /// Not caught where it happens; isolated per user like any provider
    /// failure.
    #[error("metrics publish failed: {0}")]
    Metrics(#[from] MetricsError),

    /// Token store could not be read or parsed
    #[error("failed to read token store at {path}: {reason}")]
    TokenStore { path: String, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RotationError {
    /// Get a severity level for logging
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Run-level problems operators must fix
            Self::Configuration(_) | Self::TokenStore { .. } => ErrorSeverity::Critical,

            // Per-user failures that abort one pass
            Self::Provider(_) | Self::Metrics(_) => ErrorSeverity::Error,

            // Expected bad-account state
            Self::InvalidUser { .. } => ErrorSeverity::Warning,
        }
    }

    /// Log the error with appropriate severity, tagged with the user key
    pub fn log(&self, user: &str) {
        match self.severity() {
            ErrorSeverity::Critical => {
                tracing::error!(user = %user, error = %self, "Critical rotation error");
            }
            ErrorSeverity::Error => {
                tracing::error!(user = %user, error = %self, "Rotation failed for user");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(user = %user, error = %self, "Rotation skipped for user");
            }
        }
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Run-level errors that should alert operators
    Critical,
    /// Per-user failures
    Error,
    /// Expected per-user conditions
    Warning,
}

/// Result type alias for worker operations
pub type RotationResult<T> = Result<T, RotationError>;

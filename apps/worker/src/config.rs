//! Worker configuration loaded from environment variables
//!
//! Configuration is loaded from environment variables with sensible
//! defaults for development environments; only the Spotify application
//! credentials are required.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rotify_shared_config::{CommonConfig, Environment, MetricsConfig, SpotifyConfig};

/// Default name of the playlist tracks are rotated out of
pub const DEFAULT_SOURCE_PLAYLIST: &str = "Tomorrow";

/// Default name of the playlist tracks are rotated into
pub const DEFAULT_DEST_PLAYLIST: &str = "Today";

/// Worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Maximum number of users rotated concurrently
    pub max_concurrent_users: usize,

    /// Path to the JSON token store
    pub tokens_path: PathBuf,

    /// Name of the queue ("Tomorrow") playlist
    pub source_playlist: String,

    /// Name of the destination ("Today") playlist
    pub dest_playlist: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            max_concurrent_users: env::var("WORKER_MAX_CONCURRENT_USERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("Invalid WORKER_MAX_CONCURRENT_USERS value")?,

            tokens_path: PathBuf::from(
                env::var("TOKENS_PATH").unwrap_or_else(|_| "tokens.json".to_string()),
            ),

            source_playlist: env::var("ROTATION_SOURCE_PLAYLIST")
                .unwrap_or_else(|_| DEFAULT_SOURCE_PLAYLIST.to_string()),

            dest_playlist: env::var("ROTATION_DEST_PLAYLIST")
                .unwrap_or_else(|_| DEFAULT_DEST_PLAYLIST.to_string()),
        })
    }

    /// Build a configuration around an already-loaded common config,
    /// with worker defaults (useful for testing)
    pub fn with_common(common: CommonConfig) -> Self {
        Self {
            common,
            max_concurrent_users: 4,
            tokens_path: PathBuf::from("tokens.json"),
            source_playlist: DEFAULT_SOURCE_PLAYLIST.to_string(),
            dest_playlist: DEFAULT_DEST_PLAYLIST.to_string(),
        }
    }

    // Convenience accessors for common config fields

    /// Get Spotify application configuration
    pub fn spotify(&self) -> &SpotifyConfig {
        &self.common.spotify
    }

    /// Get metrics sink configuration (if configured)
    pub fn metrics(&self) -> Option<&MetricsConfig> {
        self.common.metrics.as_ref()
    }

    /// Get token store path
    pub fn tokens_path(&self) -> &Path {
        &self.tokens_path
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> Vec<(&'static str, Option<&'static str>)> {
        vec![
            ("SPOTIFY_CLIENT_ID", Some("test-id")),
            ("SPOTIFY_CLIENT_SECRET", Some("test-secret")),
            ("METRICS_SINK_URL", None),
        ]
    }

    #[test]
    fn test_defaults() {
        let mut vars = base_vars();
        vars.extend([
            ("WORKER_MAX_CONCURRENT_USERS", None),
            ("TOKENS_PATH", None),
            ("ROTATION_SOURCE_PLAYLIST", None),
            ("ROTATION_DEST_PLAYLIST", None),
        ]);
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.max_concurrent_users, 4);
            assert_eq!(config.tokens_path, PathBuf::from("tokens.json"));
            assert_eq!(config.source_playlist, "Tomorrow");
            assert_eq!(config.dest_playlist, "Today");
            assert!(config.metrics().is_none());
        });
    }

    #[test]
    fn test_custom_values() {
        let mut vars = base_vars();
        vars.extend([
            ("WORKER_MAX_CONCURRENT_USERS", Some("8")),
            ("TOKENS_PATH", Some("/etc/rotify/tokens.json")),
            ("ROTATION_SOURCE_PLAYLIST", Some("Queue")),
            ("ROTATION_DEST_PLAYLIST", Some("Now Playing")),
        ]);
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.max_concurrent_users, 8);
            assert_eq!(config.tokens_path, PathBuf::from("/etc/rotify/tokens.json"));
            assert_eq!(config.source_playlist, "Queue");
            assert_eq!(config.dest_playlist, "Now Playing");
        });
    }

    #[test]
    fn test_invalid_concurrency_fails() {
        let mut vars = base_vars();
        vars.push(("WORKER_MAX_CONCURRENT_USERS", Some("not_a_number")));
        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_missing_credentials_fail() {
        temp_env::with_vars(
            [
                ("SPOTIFY_CLIENT_ID", None::<&str>),
                ("SPOTIFY_CLIENT_SECRET", None),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_with_common_defaults() {
        let common = CommonConfig {
            spotify: SpotifyConfig::new("id", "secret"),
            metrics: None,
            environment: Environment::Development,
            log_level: "info".to_string(),
        };
        let config = Config::with_common(common);
        assert_eq!(config.source_playlist, DEFAULT_SOURCE_PLAYLIST);
        assert_eq!(config.dest_playlist, DEFAULT_DEST_PLAYLIST);
        assert_eq!(config.max_concurrent_users, 4);
    }
}

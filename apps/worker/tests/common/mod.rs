//! Shared helpers for worker integration tests

use rotify_shared_config::{CommonConfig, Environment, MetricsConfig, SpotifyConfig};
use rotify_worker::{Config, UserCredential};

/// Build a worker config pointing both provider base URLs at a mock
/// server, with an optional mock metrics sink
pub fn test_config(spotify_url: &str, metrics_sink: Option<String>) -> Config {
    let spotify =
        SpotifyConfig::new("test-client-id", "test-client-secret").with_base_urls(spotify_url, spotify_url);
    Config::with_common(CommonConfig {
        spotify,
        metrics: metrics_sink.map(MetricsConfig::new),
        environment: Environment::Development,
        log_level: "debug".to_string(),
    })
}

/// Build a user credential fixture
pub fn credential(key: &str, refresh_token: &str) -> UserCredential {
    UserCredential {
        key: key.to_string(),
        refresh_token: refresh_token.to_string(),
    }
}

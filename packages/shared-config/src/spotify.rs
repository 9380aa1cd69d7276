//! Spotify application credential configuration

use crate::{get_required_env, parse_env, ConfigError, ConfigResult};

/// Default Spotify accounts (auth) service base URL
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Default Spotify Web API base URL
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Spotify application configuration
///
/// The client id/secret pair identifies the application against the
/// accounts service when exchanging refresh tokens. Base URLs are
/// overridable so tests can point the client at a mock server.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Accounts service base URL (token refresh)
    pub accounts_url: String,

    /// Web API base URL
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SpotifyConfig {
    /// Load Spotify configuration from environment variables
    ///
    /// `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` are required;
    /// their absence is a configuration error.
    pub fn from_env() -> ConfigResult<Self> {
        let client_id = get_required_env("SPOTIFY_CLIENT_ID")?;
        let client_secret = get_required_env("SPOTIFY_CLIENT_SECRET")?;

        if client_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "SPOTIFY_CLIENT_ID".to_string(),
                "client id cannot be empty".to_string(),
            ));
        }
        if client_secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "SPOTIFY_CLIENT_SECRET".to_string(),
                "client secret cannot be empty".to_string(),
            ));
        }

        let accounts_url = std::env::var("SPOTIFY_ACCOUNTS_URL")
            .unwrap_or_else(|_| DEFAULT_ACCOUNTS_URL.to_string());
        let api_url =
            std::env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        validate_url("SPOTIFY_ACCOUNTS_URL", &accounts_url)?;
        validate_url("SPOTIFY_API_URL", &api_url)?;

        Ok(Self {
            client_id,
            client_secret,
            accounts_url,
            api_url,
            timeout_secs: parse_env("SPOTIFY_TIMEOUT", 30)?,
        })
    }

    /// Create a configuration with custom credentials (useful for testing)
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Override both base URLs (useful for testing against a mock server)
    pub fn with_base_urls(
        mut self,
        accounts_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        self.accounts_url = accounts_url.into();
        self.api_url = api_url.into();
        self
    }

    /// Full URL of the token refresh endpoint
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }

    /// Full URL for a Web API endpoint path
    pub fn api_endpoint(&self, path: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/v1/{}", base, path)
    }
}

fn validate_url(name: &str, value: &str) -> ConfigResult<()> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = SpotifyConfig::new("client-id", "client-secret");
        assert_eq!(config.client_id, "client-id");
        assert_eq!(config.client_secret, "client-secret");
        assert_eq!(config.accounts_url, DEFAULT_ACCOUNTS_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_token_url() {
        let config = SpotifyConfig::new("id", "secret")
            .with_base_urls("http://localhost:9000/", "http://localhost:9001");
        assert_eq!(config.token_url(), "http://localhost:9000/api/token");
    }

    #[test]
    fn test_api_endpoint() {
        let config =
            SpotifyConfig::new("id", "secret").with_base_urls("http://a", "http://localhost:9001");
        assert_eq!(config.api_endpoint("me"), "http://localhost:9001/v1/me");
        assert_eq!(
            config.api_endpoint("/playlists/abc/tracks"),
            "http://localhost:9001/v1/playlists/abc/tracks"
        );
    }

    #[test]
    fn test_api_endpoint_with_trailing_slash() {
        let config =
            SpotifyConfig::new("id", "secret").with_base_urls("http://a", "http://localhost:9001/");
        assert_eq!(config.api_endpoint("me"), "http://localhost:9001/v1/me");
    }

    #[test]
    fn test_from_env_requires_credentials() {
        temp_env::with_vars(
            [
                ("SPOTIFY_CLIENT_ID", None::<&str>),
                ("SPOTIFY_CLIENT_SECRET", None),
            ],
            || {
                let result = SpotifyConfig::from_env();
                assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
            },
        );
    }

    #[test]
    fn test_from_env_rejects_empty_secret() {
        temp_env::with_vars(
            [
                ("SPOTIFY_CLIENT_ID", Some("id")),
                ("SPOTIFY_CLIENT_SECRET", Some("   ")),
            ],
            || {
                let result = SpotifyConfig::from_env();
                assert!(matches!(result, Err(ConfigError::InvalidValue(name, _)) if name == "SPOTIFY_CLIENT_SECRET"));
            },
        );
    }

    #[test]
    fn test_from_env_rejects_invalid_base_url() {
        temp_env::with_vars(
            [
                ("SPOTIFY_CLIENT_ID", Some("id")),
                ("SPOTIFY_CLIENT_SECRET", Some("secret")),
                ("SPOTIFY_API_URL", Some("not a url")),
            ],
            || {
                let result = SpotifyConfig::from_env();
                assert!(matches!(result, Err(ConfigError::InvalidUrl(name, _)) if name == "SPOTIFY_API_URL"));
            },
        );
    }
}

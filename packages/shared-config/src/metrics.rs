//! Metrics sink configuration types

use crate::{get_required_env, parse_env, ConfigError, ConfigResult};
use std::env;

/// Default namespace metrics are published under
pub const DEFAULT_NAMESPACE: &str = "rotify";

/// Metrics sink configuration
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// HTTP endpoint data points are posted to
    pub sink_url: String,

    /// Namespace all data points are published under
    pub namespace: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MetricsConfig {
    /// Load metrics configuration from environment variables
    ///
    /// Returns an error if `METRICS_SINK_URL` is not set. This allows
    /// consumers to call `.ok()` to get `Option<MetricsConfig>` when the
    /// sink is an optional integration.
    pub fn from_env() -> ConfigResult<Self> {
        let sink_url = get_required_env("METRICS_SINK_URL")?;

        url::Url::parse(&sink_url)
            .map_err(|e| ConfigError::InvalidUrl("METRICS_SINK_URL".to_string(), e.to_string()))?;

        Ok(Self {
            sink_url,
            namespace: env::var("METRICS_NAMESPACE")
                .unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string()),
            timeout_secs: parse_env("METRICS_TIMEOUT", 10)?,
        })
    }

    /// Check if a metrics sink is configured
    pub fn is_configured() -> bool {
        env::var("METRICS_SINK_URL").is_ok()
    }

    /// Create a configuration with a custom sink URL (useful for testing)
    pub fn new(sink_url: impl Into<String>) -> Self {
        Self {
            sink_url: sink_url.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_secs: 10,
        }
    }

    /// Override the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

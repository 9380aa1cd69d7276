//! HTTP metrics sink client

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use rotify_shared_config::MetricsConfig;
use tracing::debug;

use crate::error::{MetricsError, MetricsResult};
use crate::models::{DataPoint, Dimension};

/// Maximum error body size to keep error messages bounded
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Metrics sink client
///
/// Publishes one data point per call under the configured namespace.
/// The sink is assumed append-only and safe for concurrent writers.
#[derive(Clone)]
pub struct MetricsClient {
    http_client: Client,
    config: MetricsConfig,
}

impl fmt::Debug for MetricsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsClient")
            .field("sink_url", &self.config.sink_url)
            .field("namespace", &self.config.namespace)
            .finish()
    }
}

impl MetricsClient {
    /// Create a new metrics client from configuration
    pub fn new(config: &MetricsConfig) -> MetricsResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("rotify/0.1")
            .build()
            .map_err(MetricsError::Http)?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Publish a single named observation with tag dimensions
    ///
    /// The data point is stamped with the current UTC time and posted to
    /// the sink. Failures propagate to the caller.
    pub async fn publish(
        &self,
        name: &str,
        value: f64,
        dimensions: &[(&str, &str)],
    ) -> MetricsResult<()> {
        let point = DataPoint {
            namespace: self.config.namespace.clone(),
            name: name.to_string(),
            value,
            timestamp: Utc::now(),
            dimensions: dimensions
                .iter()
                .map(|(n, v)| Dimension::new(*n, *v))
                .collect(),
        };

        debug!(metric = %point.name, value = point.value, "Publishing metric");

        let response = self
            .http_client
            .post(&self.config.sink_url)
            .json(&point)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MetricsError::Timeout
                } else {
                    MetricsError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY_SIZE {
                message.truncate(MAX_ERROR_BODY_SIZE);
            }
            return Err(MetricsError::Api { status, message });
        }

        Ok(())
    }
}

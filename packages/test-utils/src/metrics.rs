//! Mock metrics sink for testing metric emission

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock HTTP metrics sink
///
/// Accepts data-point posts on `/put` and records them for inspection.
pub struct MockMetricsServer {
    server: MockServer,
}

impl MockMetricsServer {
    /// Start a new mock metrics sink
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Sink URL to configure a `MetricsConfig` with
    pub fn sink_url(&self) -> String {
        format!("{}/put", self.server.uri())
    }

    /// Accept every published data point
    pub async fn mock_publish_success(&self) {
        Mock::given(method("POST"))
            .and(path("/put"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Reject every published data point with the given status
    pub async fn mock_publish_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/put"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": "sink rejected data point"
            })))
            .mount(&self.server)
            .await;
    }

    /// Data points received so far, in arrival order
    pub async fn published_points(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path() == "/put")
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }
}

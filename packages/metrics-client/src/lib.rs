//! Metrics sink client for rotify
//!
//! Sends single named numeric observations with tag dimensions to an
//! external HTTP metrics sink under a fixed namespace.
//!
//! # Example
//!
//! ```rust,no_run
//! use rotify_metrics_client::MetricsClient;
//! use rotify_shared_config::MetricsConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MetricsConfig::new("http://metrics:8080/put");
//! let client = MetricsClient::new(&config)?;
//! client.publish("tracks_queued", 250.0, &[("user", "alice")]).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::MetricsClient;
pub use error::{MetricsError, MetricsResult};
pub use models::{DataPoint, Dimension};

//! Metrics data point models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single named numeric observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    /// Namespace the point is published under
    pub namespace: String,
    /// Metric name
    pub name: String,
    /// Observed value
    pub value: f64,
    /// Observation timestamp (UTC)
    pub timestamp: DateTime<Utc>,
    /// Tag dimensions (e.g. user id)
    pub dimensions: Vec<Dimension>,
}

/// One name/value tag dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

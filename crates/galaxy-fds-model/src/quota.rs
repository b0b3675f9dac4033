//! Bucket quota policies.

use serde::{Deserialize, Serialize};

/// What a quota limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaType {
    /// Requests per second.
    Qps,
    /// Bytes per second.
    Throughput,
}

/// A single quota entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    /// The limited dimension.
    #[serde(rename = "type")]
    pub quota_type: QuotaType,
    /// The limit value.
    pub value: i64,
}

/// The quota policy of a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaPolicy {
    /// All quota entries.
    #[serde(default)]
    pub quotas: Vec<Quota>,
}

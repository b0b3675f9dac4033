//! Object listings and pagination state.

use serde::{Deserialize, Serialize};

use crate::bucket::Owner;

/// Summary of one object inside a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    /// Object name (key).
    pub name: String,
    /// Object owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    /// Object size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Response body of the list-objects operation.
///
/// When `truncated` is true, pass the whole result back to
/// `list_next_batch` with `next_marker` intact to fetch the following page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsResult {
    /// Bucket name the listing belongs to.
    pub name: String,
    /// Prefix the listing was filtered by.
    #[serde(default)]
    pub prefix: String,
    /// Delimiter used to roll up common prefixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    /// Marker this page started from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Marker to resume from for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_marker: Option<String>,
    /// Maximum number of keys per page.
    #[serde(default)]
    pub max_keys: u32,
    /// Whether more results are available.
    #[serde(default)]
    pub truncated: bool,
    /// The objects on this page.
    #[serde(default)]
    pub objects: Vec<ObjectSummary>,
    /// Rolled-up common prefixes on this page.
    #[serde(default)]
    pub common_prefixes: Vec<String>,
}

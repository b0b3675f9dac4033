//! Objects and object write results.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::metadata::ObjectMetadata;

/// Response body of put-object and post-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutObjectResult {
    /// Bucket the object was written to.
    pub bucket_name: String,
    /// Object name; server-assigned for post-object.
    pub object_name: String,
}

/// An object read from the service: its content plus the metadata subset of
/// the response headers.
#[derive(Debug, Clone)]
pub struct FdsObject {
    /// Bucket the object lives in.
    pub bucket_name: String,
    /// Object name (key).
    pub object_name: String,
    /// Object metadata extracted from response headers.
    pub metadata: ObjectMetadata,
    /// The object content.
    pub content: Bytes,
}

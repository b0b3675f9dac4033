//! Buckets, owners, and bucket-level listing results.

use serde::{Deserialize, Serialize};

/// The owner of a bucket or object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Access id of the owner.
    pub id: String,
    /// Human-readable name, when the server supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A bucket as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Bucket name, unique per region.
    pub name: String,
    /// Creation time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,
}

/// Response body of the list-buckets operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllBucketsResult {
    /// The authenticated caller.
    pub owner: Owner,
    /// All buckets owned by the caller.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// Response body of the list-domain-mappings operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDomainMappingsResult {
    /// Custom domain names mapped to the bucket.
    #[serde(default)]
    pub domain_mappings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_list_all_buckets_result() {
        let json = r#"{
            "owner": {"id": "AK123", "displayName": "alice"},
            "buckets": [{"name": "mybucket", "creationTime": 1546300800000}]
        }"#;
        let result: ListAllBucketsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.owner.id, "AK123");
        assert_eq!(result.buckets.len(), 1);
        assert_eq!(result.buckets[0].name, "mybucket");
        assert_eq!(result.buckets[0].creation_time, Some(1_546_300_800_000));
    }

    #[test]
    fn test_should_tolerate_missing_optional_fields() {
        let json = r#"{"owner": {"id": "AK123"}}"#;
        let result: ListAllBucketsResult = serde_json::from_str(json).unwrap();
        assert!(result.owner.display_name.is_none());
        assert!(result.buckets.is_empty());
    }

    #[test]
    fn test_should_deserialize_domain_mappings() {
        let json = r#"{"domainMappings": ["cdn.example.com"]}"#;
        let result: ListDomainMappingsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.domain_mappings, vec!["cdn.example.com"]);
    }
}

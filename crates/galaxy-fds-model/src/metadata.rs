//! The validated object metadata header bag.
//!
//! FDS carries object metadata in HTTP headers: a small set of predefined
//! standard headers plus user-defined entries under the `x-xiaomi-meta-`
//! prefix. Anything else is rejected at insertion time rather than silently
//! sent and dropped by the server.

use std::collections::BTreeMap;

use http::{HeaderMap, HeaderName, HeaderValue};

/// Prefix for user-defined metadata header names.
pub const USER_DEFINED_METADATA_PREFIX: &str = "x-xiaomi-meta-";

/// Predefined standard headers accepted as object metadata.
const PREDEFINED_HEADERS: &[&str] = &[
    "cache-control",
    "content-encoding",
    "content-length",
    "content-md5",
    "content-type",
];

/// Error raised when a header name is not valid object metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The header is neither predefined nor under the user-defined prefix.
    #[error(
        "invalid metadata header `{0}`: must be a predefined header or start with `x-xiaomi-meta-`"
    )]
    InvalidName(String),
    /// The name or value is not a valid HTTP header string.
    #[error("invalid header encoding for `{0}`")]
    InvalidEncoding(String),
}

/// Object metadata attached when writing an object and returned when reading
/// one. Keys are stored lowercased; insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    headers: BTreeMap<String, String>,
}

impl ObjectMetadata {
    /// An empty metadata bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a metadata header after validating its name.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidName`] if the header is neither a
    /// predefined metadata header nor prefixed with `x-xiaomi-meta-`.
    pub fn add_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), MetadataError> {
        let name = name.into().to_lowercase();
        if !Self::is_valid_name(&name) {
            return Err(MetadataError::InvalidName(name));
        }
        self.headers.insert(name, value.into());
        Ok(())
    }

    /// Insert a user-defined entry, prepending the `x-xiaomi-meta-` prefix to
    /// `key` if it is not already there.
    pub fn add_user_metadata(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref().to_lowercase();
        let name = if key.starts_with(USER_DEFINED_METADATA_PREFIX) {
            key
        } else {
            format!("{USER_DEFINED_METADATA_PREFIX}{key}")
        };
        self.headers.insert(name, value.into());
    }

    /// Get a metadata value by lowercased header name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over all entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the bag as an [`http::HeaderMap`] for signing and transmission.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidEncoding`] if an entry is not a valid
    /// HTTP header name or value.
    pub fn to_header_map(&self) -> Result<HeaderMap, MetadataError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| MetadataError::InvalidEncoding(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| MetadataError::InvalidEncoding(name.clone()))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// Extract the metadata subset from response headers: predefined headers
    /// plus everything under the user-defined prefix.
    #[must_use]
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let mut metadata = Self::new();
        for (name, value) in headers {
            let name = name.as_str();
            if !Self::is_valid_name(name) {
                continue;
            }
            if let Ok(value) = value.to_str() {
                metadata.headers.insert(name.to_owned(), value.to_owned());
            }
        }
        metadata
    }

    fn is_valid_name(name: &str) -> bool {
        PREDEFINED_HEADERS.contains(&name) || name.starts_with(USER_DEFINED_METADATA_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_accept_predefined_headers() {
        let mut metadata = ObjectMetadata::new();
        metadata.add_header("Content-Type", "text/plain").unwrap();
        assert_eq!(metadata.get("content-type"), Some("text/plain"));
    }

    #[test]
    fn test_should_accept_user_defined_prefix() {
        let mut metadata = ObjectMetadata::new();
        metadata.add_header("x-xiaomi-meta-mode", "33188").unwrap();
        assert_eq!(metadata.get("x-xiaomi-meta-mode"), Some("33188"));
    }

    #[test]
    fn test_should_reject_arbitrary_header_names() {
        let mut metadata = ObjectMetadata::new();
        let result = metadata.add_header("x-custom", "nope");
        assert!(matches!(result, Err(MetadataError::InvalidName(_))));
    }

    #[test]
    fn test_should_prefix_user_metadata_keys() {
        let mut metadata = ObjectMetadata::new();
        metadata.add_user_metadata("mode", "33188");
        assert_eq!(metadata.get("x-xiaomi-meta-mode"), Some("33188"));
    }

    #[test]
    fn test_should_round_trip_through_header_map() {
        let mut metadata = ObjectMetadata::new();
        metadata.add_header("content-type", "text/plain").unwrap();
        metadata.add_user_metadata("mode", "33188");

        let map = metadata.to_header_map().unwrap();
        let back = ObjectMetadata::from_header_map(&map);
        assert_eq!(back, metadata);
    }

    #[test]
    fn test_should_ignore_unrelated_response_headers() {
        let mut map = HeaderMap::new();
        map.insert("content-type", HeaderValue::from_static("text/plain"));
        map.insert("date", HeaderValue::from_static("whenever"));
        map.insert("x-xiaomi-request-id", HeaderValue::from_static("abc_1"));

        let metadata = ObjectMetadata::from_header_map(&map);
        assert_eq!(metadata.get("content-type"), Some("text/plain"));
        assert!(metadata.get("date").is_none());
        assert!(metadata.get("x-xiaomi-request-id").is_none());
    }
}

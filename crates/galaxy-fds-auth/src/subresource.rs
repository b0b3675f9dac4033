//! The closed set of FDS sub-resource names.
//!
//! A sub-resource addresses a named facet of a bucket or object (its ACL, its
//! quota policy, its metadata) via a query marker rather than a distinct path.
//! Only names in this set participate in resource canonicalization; any other
//! query parameter is ignored by the signer.

use std::fmt;

/// A named request facet addressed via a query marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubResource {
    /// Access control list of a bucket or object (`acl`).
    Acl,
    /// Quota policy of a bucket (`quota`).
    Quota,
    /// Object metadata (`metadata`).
    Metadata,
    /// Multipart upload initiation/listing (`uploads`).
    Uploads,
    /// A specific multipart upload (`uploadId`).
    UploadId,
    /// A specific part of a multipart upload (`partNumber`).
    PartNumber,
}

impl SubResource {
    /// Every sub-resource, in declaration order.
    pub const ALL: [SubResource; 6] = [
        SubResource::Acl,
        SubResource::Quota,
        SubResource::Metadata,
        SubResource::Uploads,
        SubResource::UploadId,
        SubResource::PartNumber,
    ];

    /// The canonical name as it appears in query strings and in the
    /// canonicalized resource line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SubResource::Acl => "acl",
            SubResource::Quota => "quota",
            SubResource::Metadata => "metadata",
            SubResource::Uploads => "uploads",
            SubResource::UploadId => "uploadId",
            SubResource::PartNumber => "partNumber",
        }
    }

    /// Whether `name` is a recognized sub-resource name.
    #[must_use]
    pub fn is_sub_resource(name: &str) -> bool {
        Self::ALL.iter().any(|s| s.name() == name)
    }
}

impl fmt::Display for SubResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

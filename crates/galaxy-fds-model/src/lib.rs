//! Wire data types for the Galaxy FDS object storage service.
//!
//! These are the JSON value objects exchanged with the FDS server, serialized
//! with serde using the server's camelCase field names, plus the validated
//! [`ObjectMetadata`] header bag used when writing objects.
//!
//! # Modules
//!
//! - [`acl`] - Access control policies, grants, and permissions
//! - [`bucket`] - Buckets and bucket listings
//! - [`list`] - Object listings and pagination state
//! - [`metadata`] - The validated object metadata header bag
//! - [`object`] - Objects, object summaries, and put results
//! - [`quota`] - Bucket quota policies

pub mod acl;
pub mod bucket;
pub mod list;
pub mod metadata;
pub mod object;
pub mod quota;

pub use acl::{AccessControlPolicy, Grant, GrantType, Grantee, Permission, UserGroups};
pub use bucket::{Bucket, ListAllBucketsResult, ListDomainMappingsResult, Owner};
pub use list::{ListObjectsResult, ObjectSummary};
pub use metadata::{MetadataError, ObjectMetadata, USER_DEFINED_METADATA_PREFIX};
pub use object::{FdsObject, PutObjectResult};
pub use quota::{Quota, QuotaPolicy, QuotaType};

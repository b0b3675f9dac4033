//! Error types for Galaxy-V2 request signing.
//!
//! All failures are terminal for the operation that raised them; they indicate
//! programming or configuration errors rather than transient conditions and
//! are never retried inside this crate.

/// Errors that can occur while signing a request or generating a presigned URI.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The access id or access secret is empty or otherwise unusable as key
    /// material.
    #[error("invalid credential: access id and access secret must be non-empty")]
    InvalidCredential,

    /// The configured signing algorithm is not supported.
    #[error("unsupported sign algorithm: {0}")]
    UnsupportedSignAlgorithm(String),

    /// A base or relative URI could not be parsed during canonicalization.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// Catch-all for unexpected failures from the underlying MAC computation
    /// or header encoding. The message never contains key material.
    #[error("signing failed: {0}")]
    SigningFailure(String),
}

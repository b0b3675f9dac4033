//! Client-facing error type.

use galaxy_fds_auth::SignatureError;
use galaxy_fds_model::MetadataError;

/// Errors surfaced by FDS client operations.
///
/// Signing and metadata errors indicate programming or configuration
/// mistakes; `ServerError` carries the status and body of a non-success
/// response. Nothing is retried inside the client — retry policy belongs to
/// the caller.
#[derive(Debug, thiserror::Error)]
pub enum FdsError {
    /// Request signing failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// The HTTP transport failed (connect, send, or body read).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{operation} failed, status={status}, reason={reason}")]
    ServerError {
        /// The logical operation that failed.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, as reported by the server.
        reason: String,
    },

    /// A URI could not be constructed from its parts.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// A request header value could not be encoded.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Object metadata could not be rendered as HTTP headers.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A request or response body could not be serialized as JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for FDS client operations.
pub type FdsResult<T> = Result<T, FdsError>;

//! Galaxy-V2 request authentication for the Galaxy FDS object storage service.
//!
//! This crate implements the client side of the FDS signing protocol: given a
//! pending HTTP request (method, resource path, headers, optional
//! sub-resources) and a long-lived access-id/access-secret pair, it produces
//! either an `Authorization` header value for that exact request or a
//! self-contained, time-bounded presigned URI that embeds the same proof in
//! its query string.
//!
//! Both modes share one canonicalization path. The signature is
//! `Base64(HMAC(secret, StringToSign))` where:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date-or-Expires + "\n" +
//!                CanonicalizedXiaomiHeaders +
//!                CanonicalizedResource
//! ```
//!
//! Header mode folds the request's `Date` header into the fourth line;
//! presign mode folds the expiration epoch seconds there instead. Exactly one
//! of the two participates in a given canonicalization, never both.
//!
//! # Usage
//!
//! ```rust
//! use galaxy_fds_auth::{Credential, RequestSigner};
//!
//! let credential = Credential::new("AK123", "SK456").unwrap();
//! let signer = RequestSigner::new(credential);
//!
//! let uri: http::Uri = "https://files.fds.api.xiaomi.com/mybucket".parse().unwrap();
//! let headers = signer
//!     .prepare_request_headers(&uri, &http::Method::GET, None, &http::HeaderMap::new())
//!     .unwrap();
//! assert!(headers.contains_key(http::header::AUTHORIZATION));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical string-to-sign construction
//! - [`credentials`] - The immutable access-id/access-secret pair
//! - [`error`] - Signing error types
//! - [`headers`] - Header assembly (`Date`, request id, `Authorization`)
//! - [`presigned`] - Presigned URI generation
//! - [`signer`] - HMAC computation and algorithm selection
//! - [`subresource`] - The closed set of FDS sub-resource names
//!
//! # Concurrency
//!
//! The signing core is stateless across calls: every operation is a
//! synchronous pure computation over its arguments plus the immutable
//! credential and a thread-local random source. It is safe to sign from any
//! number of threads without external locking.

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod headers;
pub mod presigned;
pub mod signer;
pub mod subresource;

pub use credentials::Credential;
pub use error::SignatureError;
pub use headers::RequestSigner;
pub use presigned::generate_presigned_uri;
pub use signer::{SignAlgorithm, sign_to_base64};
pub use subresource::SubResource;

//! Presigned URI generation.
//!
//! A presigned URI embeds the access id, an expiration, and the signature in
//! its query string so that an unauthenticated party can perform one specific
//! operation until the deadline. Presenting it to the server requires no
//! additional headers.
//!
//! Canonicalization is shared with header-mode signing; the only difference is
//! that the expiration epoch seconds occupy the timestamp line in place of the
//! `Date` header value.

use chrono::{DateTime, Utc};
use http::{HeaderMap, Method, Uri};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::canonical::build_string_to_sign;
use crate::credentials::Credential;
use crate::error::SignatureError;
use crate::signer::{SignAlgorithm, sign};
use crate::subresource::SubResource;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Query parameter carrying the access id.
pub const ACCESS_ID_PARAM: &str = "GalaxyAccessId";
/// Query parameter carrying the expiration epoch seconds.
pub const EXPIRES_PARAM: &str = "Expires";
/// Query parameter carrying the URL-escaped base64 signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Characters escaped in URI components; everything except RFC 3986
/// unreserved characters.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a presigned URI for one operation on `bucket`/`object`.
///
/// Pure function over its inputs; no network call is made, and the expiration
/// is deliberately not validated to be in the future — that policy belongs to
/// the caller and the server, not to the signing core.
///
/// The resulting query string carries the sorted sub-resource names (if any)
/// followed by `GalaxyAccessId`, `Expires` (integer epoch seconds), and the
/// URL-escaped base64 `Signature`.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidUri`] if `base_uri` cannot be parsed or
/// lacks a scheme or authority — detected before any signature is computed —
/// and the usual signing errors otherwise.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use galaxy_fds_auth::{Credential, SignAlgorithm, presigned::generate_presigned_uri};
///
/// let credential = Credential::new("AK123", "SK456").unwrap();
/// let expiration = chrono::Utc.timestamp_opt(1893456000, 0).unwrap();
/// let uri = generate_presigned_uri(
///     "https://files.fds.api.xiaomi.com",
///     "b",
///     "o.txt",
///     &[],
///     expiration,
///     &http::Method::GET,
///     &credential,
///     SignAlgorithm::HmacSha1,
/// )
/// .unwrap();
/// assert!(uri.query().unwrap().contains("GalaxyAccessId=AK123&Expires=1893456000"));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn generate_presigned_uri(
    base_uri: &str,
    bucket: &str,
    object: &str,
    sub_resources: &[SubResource],
    expiration: DateTime<Utc>,
    method: &Method,
    credential: &Credential,
    algorithm: SignAlgorithm,
) -> Result<Uri, SignatureError> {
    let base: Uri = base_uri
        .parse()
        .map_err(|e: http::uri::InvalidUri| SignatureError::InvalidUri(e.to_string()))?;
    let scheme = base
        .scheme_str()
        .ok_or_else(|| SignatureError::InvalidUri(format!("missing scheme in `{base_uri}`")))?;
    let authority = base
        .authority()
        .ok_or_else(|| SignatureError::InvalidUri(format!("missing authority in `{base_uri}`")))?
        .as_str();

    let path = format!("/{bucket}/{}", encode_object_path(object));
    let expires = expiration.timestamp().to_string();

    let mut names: Vec<&str> = sub_resources.iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names.dedup();

    // Same canonicalization path as header-mode signing; the expiration
    // occupies the timestamp line and there are no participating headers.
    let relative_uri = if names.is_empty() {
        path.clone()
    } else {
        format!("{path}?{}", names.join("&"))
    };
    let string_to_sign =
        build_string_to_sign(method, &relative_uri, &HeaderMap::new(), &expires);

    let signature = sign(&string_to_sign, credential.access_secret(), algorithm)?;
    let signature_b64 = BASE64.encode(signature);
    let escaped_signature = utf8_percent_encode(&signature_b64, URI_ENCODE_SET).to_string();

    let mut query = String::new();
    for name in &names {
        query.push_str(name);
        query.push('&');
    }
    query.push_str(&format!(
        "{ACCESS_ID_PARAM}={}&{EXPIRES_PARAM}={expires}&{SIGNATURE_PARAM}={escaped_signature}",
        credential.access_id()
    ));

    format!("{scheme}://{authority}{path}?{query}")
        .parse()
        .map_err(|e: http::uri::InvalidUri| SignatureError::InvalidUri(e.to_string()))
}

/// Percent-encode an object name for the URI path, preserving `/` so that
/// multi-segment object keys keep their structure.
fn encode_object_path(object: &str) -> String {
    object
        .split('/')
        .map(|segment| utf8_percent_encode(segment, URI_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

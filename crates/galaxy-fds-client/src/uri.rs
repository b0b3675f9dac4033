//! URI formatting for FDS operations.

use galaxy_fds_auth::SubResource;
use http::Uri;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::FdsError;

// Everything except RFC 3986 unreserved characters gets escaped.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the operation URI from a base URI, a resource path, and optional
/// sub-resources.
///
/// The resource is appended as `/resource` with each path segment
/// percent-encoded; sub-resource names become the query string, joined with
/// `&` in the order given (the signer sorts them independently during
/// canonicalization).
///
/// # Errors
///
/// Returns [`FdsError::InvalidUri`] if the base URI cannot be parsed or lacks
/// a scheme or authority.
pub fn format_uri(
    base_uri: &str,
    resource: &str,
    sub_resources: &[SubResource],
) -> Result<Uri, FdsError> {
    let base: Uri = base_uri
        .parse()
        .map_err(|e: http::uri::InvalidUri| FdsError::InvalidUri(e.to_string()))?;
    let scheme = base
        .scheme_str()
        .ok_or_else(|| FdsError::InvalidUri(format!("missing scheme in `{base_uri}`")))?;
    let authority = base
        .authority()
        .ok_or_else(|| FdsError::InvalidUri(format!("missing authority in `{base_uri}`")))?
        .as_str();

    let path = format!("/{}", encode_path(resource));
    let uri = if sub_resources.is_empty() {
        format!("{scheme}://{authority}{path}")
    } else {
        let query: Vec<&str> = sub_resources.iter().map(|s| s.name()).collect();
        format!("{scheme}://{authority}{path}?{}", query.join("&"))
    };

    uri.parse()
        .map_err(|e: http::uri::InvalidUri| FdsError::InvalidUri(e.to_string()))
}

/// Append extra (unsigned) query parameters to an already-formatted URI.
///
/// FDS attaches pagination and command parameters after signing; they do not
/// participate in canonicalization, so the signature stays valid.
///
/// # Errors
///
/// Returns [`FdsError::InvalidUri`] if the resulting URI fails to parse.
pub fn append_query(uri: &Uri, params: &[(&str, &str)]) -> Result<Uri, FdsError> {
    if params.is_empty() {
        return Ok(uri.clone());
    }

    let mut result = uri.to_string();
    let mut separator = if uri.query().is_some() { '&' } else { '?' };
    for (name, value) in params {
        result.push(separator);
        result.push_str(&utf8_percent_encode(name, ENCODE_SET).to_string());
        if !value.is_empty() {
            result.push('=');
            result.push_str(&utf8_percent_encode(value, ENCODE_SET).to_string());
        }
        separator = '&';
    }

    result
        .parse()
        .map_err(|e: http::uri::InvalidUri| FdsError::InvalidUri(e.to_string()))
}

/// Percent-encode a resource path, preserving `/` between segments.
fn encode_path(resource: &str) -> String {
    resource
        .split('/')
        .map(|segment| utf8_percent_encode(segment, ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

//! Canonical string-to-sign construction for Galaxy-V2 signing.
//!
//! The canonical string has a fixed line order:
//!
//! ```text
//! HTTP-Verb\n
//! Content-MD5\n
//! Content-Type\n
//! Date-or-Expires\n
//! x-xiaomi-*:value\n   (zero or more, sorted by name)
//! CanonicalizedResource
//! ```
//!
//! A missing `Content-MD5` or `Content-Type` contributes an empty line, not an
//! omitted line, so the line count is constant for a given header category.
//! Headers outside the signed set are excluded so that intermediary-added
//! headers cannot invalidate a signature.

use std::collections::BTreeMap;

use http::{HeaderMap, Method, header};
use percent_encoding::percent_decode_str;

use crate::subresource::SubResource;

/// Reserved prefix for provider custom headers; any header whose lowercased
/// name starts with this participates in canonicalization.
pub const XIAOMI_HEADER_PREFIX: &str = "x-xiaomi-";

/// Build the full string to sign from a pending request.
///
/// `relative_uri` is the path-and-query form of the target URI, exactly as it
/// will appear on the wire. `timestamp` is the `Date` header value in header
/// mode, or the expiration epoch seconds in presign mode; exactly one of the
/// two participates in a given canonicalization.
///
/// This is a pure function: identical inputs yield byte-identical output,
/// independent of header insertion order, locale, or local time zone.
///
/// # Examples
///
/// ```
/// use galaxy_fds_auth::canonical::build_string_to_sign;
///
/// let canonical = build_string_to_sign(
///     &http::Method::GET,
///     "/mybucket",
///     &http::HeaderMap::new(),
///     "Tue, 01 Jan 2019 00:00:00 GMT",
/// );
/// assert_eq!(canonical, "GET\n\n\nTue, 01 Jan 2019 00:00:00 GMT\n/mybucket");
/// ```
#[must_use]
pub fn build_string_to_sign(
    method: &Method,
    relative_uri: &str,
    headers: &HeaderMap,
    timestamp: &str,
) -> String {
    let content_md5 = header_value(headers, "content-md5");
    let content_type = header_value(headers, header::CONTENT_TYPE.as_str());
    let xiaomi_headers = build_canonicalized_xiaomi_headers(headers);
    let resource = canonicalize_resource(relative_uri);

    format!(
        "{method}\n{content_md5}\n{content_type}\n{timestamp}\n{xiaomi_headers}{resource}"
    )
}

/// Build the canonicalized `x-xiaomi-*` header block.
///
/// Participating headers are sorted lexicographically by (already lowercase)
/// name and rendered as `name:value\n`. Values are trimmed; no other
/// whitespace normalization is applied. Multi-valued headers contribute only
/// their first occurrence — a compatibility constraint with the FDS server's
/// canonicalization, not an oversight.
#[must_use]
pub fn build_canonicalized_xiaomi_headers(headers: &HeaderMap) -> String {
    let mut xiaomi_headers: BTreeMap<&str, &str> = BTreeMap::new();

    for name in headers.keys() {
        if !name.as_str().starts_with(XIAOMI_HEADER_PREFIX) {
            continue;
        }
        // HeaderMap::get returns the first value for multi-valued headers.
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            xiaomi_headers.insert(name.as_str(), value.trim());
        }
    }

    let mut result = String::new();
    for (name, value) in &xiaomi_headers {
        result.push_str(name);
        result.push(':');
        result.push_str(value);
        result.push('\n');
    }
    result
}

/// Build the canonicalized resource line from a relative URI.
///
/// The path is kept byte-for-byte as given. Query parameters whose name is a
/// recognized [`SubResource`] are sorted ascending by name and re-joined with
/// `&` after a `?`; all other query parameters are dropped. Sub-resource
/// values are percent-decoded before joining, and an empty value is treated
/// the same as an absent one, so the canonical form is independent of how the
/// caller encoded the URI. A request carrying the same logical sub-resources
/// therefore signs identically regardless of call-site ordering.
///
/// # Examples
///
/// ```
/// use galaxy_fds_auth::canonical::canonicalize_resource;
///
/// assert_eq!(canonicalize_resource("/mybucket"), "/mybucket");
/// assert_eq!(canonicalize_resource("/mybucket?acl"), "/mybucket?acl");
/// assert_eq!(canonicalize_resource("/b/o?quota&acl"), "/b/o?acl&quota");
/// assert_eq!(canonicalize_resource("/b/o?prefix=x"), "/b/o");
/// ```
#[must_use]
pub fn canonicalize_resource(relative_uri: &str) -> String {
    let (path, query) = match relative_uri.split_once('?') {
        Some((path, query)) => (path, query),
        None => (relative_uri, ""),
    };

    let mut sub_params: Vec<(&str, Option<String>)> = query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| {
            param.split_once('=').map_or((param, None), |(k, v)| {
                let decoded = percent_decode_str(v).decode_utf8_lossy().into_owned();
                // Empty values canonicalize the same as absent ones.
                let value = if decoded.is_empty() { None } else { Some(decoded) };
                (k, value)
            })
        })
        .filter(|(name, _)| SubResource::is_sub_resource(name))
        .collect();

    sub_params.sort_unstable_by(|a, b| a.0.cmp(b.0));

    if sub_params.is_empty() {
        path.to_owned()
    } else {
        let joined: Vec<String> = sub_params
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!("{name}={value}"),
                None => (*name).to_owned(),
            })
            .collect();
        format!("{path}?{}", joined.join("&"))
    }
}

/// Extract the first value of a header as a trimmed string, empty if absent.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .trim()
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_should_emit_empty_lines_for_missing_optional_headers() {
        let canonical = build_string_to_sign(
            &Method::GET,
            "/mybucket",
            &HeaderMap::new(),
            "Tue, 01 Jan 2019 00:00:00 GMT",
        );
        assert_eq!(
            canonical,
            "GET\n\n\nTue, 01 Jan 2019 00:00:00 GMT\n/mybucket"
        );
    }

    #[test]
    fn test_should_include_content_headers_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert("content-md5", HeaderValue::from_static("d41d8cd98f"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let canonical =
            build_string_to_sign(&Method::PUT, "/mybucket/obj", &headers, "1893456000");
        assert_eq!(
            canonical,
            "PUT\nd41d8cd98f\napplication/json\n1893456000\n/mybucket/obj"
        );
    }

    #[test]
    fn test_should_sort_xiaomi_headers_by_name() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-xiaomi-request-id",
            HeaderValue::from_static("8f2d1c3a_42"),
        );
        headers.insert("x-xiaomi-meta-mode", HeaderValue::from_static("33188"));

        let block = build_canonicalized_xiaomi_headers(&headers);
        assert_eq!(
            block,
            "x-xiaomi-meta-mode:33188\nx-xiaomi-request-id:8f2d1c3a_42\n"
        );
    }

    #[test]
    fn test_should_exclude_non_participating_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        let with = build_string_to_sign(&Method::GET, "/b", &headers, "d");
        let without = build_string_to_sign(&Method::GET, "/b", &HeaderMap::new(), "d");
        assert_eq!(with, without);
    }

    #[test]
    fn test_should_take_only_first_value_of_multi_valued_header() {
        let mut headers = HeaderMap::new();
        headers.append("x-xiaomi-meta-tag", HeaderValue::from_static("first"));
        headers.append("x-xiaomi-meta-tag", HeaderValue::from_static("second"));

        let block = build_canonicalized_xiaomi_headers(&headers);
        assert_eq!(block, "x-xiaomi-meta-tag:first\n");
    }

    #[test]
    fn test_should_trim_header_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-xiaomi-meta-tag", HeaderValue::from_static("  padded  "));

        let block = build_canonicalized_xiaomi_headers(&headers);
        assert_eq!(block, "x-xiaomi-meta-tag:padded\n");
    }

    #[test]
    fn test_should_sort_sub_resources_in_resource_line() {
        assert_eq!(
            canonicalize_resource("/mybucket/obj?uploads&acl&quota"),
            "/mybucket/obj?acl&quota&uploads"
        );
    }

    #[test]
    fn test_should_keep_sub_resource_values() {
        assert_eq!(
            canonicalize_resource("/b/o?partNumber=3&uploadId=xyz"),
            "/b/o?partNumber=3&uploadId=xyz"
        );
    }

    #[test]
    fn test_should_decode_sub_resource_values() {
        assert_eq!(
            canonicalize_resource("/b/o?uploadId=abc%2Fdef"),
            "/b/o?uploadId=abc/def"
        );
        assert_eq!(
            canonicalize_resource("/b/o?uploadId=abc%2Fdef"),
            canonicalize_resource("/b/o?uploadId=abc/def")
        );
    }

    #[test]
    fn test_should_treat_empty_sub_resource_value_as_absent() {
        assert_eq!(canonicalize_resource("/b/o?acl="), "/b/o?acl");
    }

    #[test]
    fn test_should_drop_unrecognized_query_parameters() {
        assert_eq!(
            canonicalize_resource("/mybucket?prefix=a&delimiter=%2F&acl"),
            "/mybucket?acl"
        );
    }
}

//! Header assembly for signed FDS requests.
//!
//! [`RequestSigner`] merges caller-supplied object metadata headers, injects a
//! GMT-formatted `Date` and a per-request unique id, signs the result, and
//! produces the final header set including `Authorization`.

use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderValue, Method, Uri, header};
use rand::RngExt;
use tracing::debug;
use uuid::Uuid;

use crate::credentials::Credential;
use crate::error::SignatureError;
use crate::signer::{SignAlgorithm, sign_to_base64};

/// Header carrying the per-request unique id, used for request tracing.
pub const REQUEST_ID_HEADER: &str = "x-xiaomi-request-id";

/// Scheme tag of the FDS `Authorization` header.
const AUTH_SCHEME: &str = "Galaxy-V2";

/// Assembles the signed header set for outbound requests.
///
/// Holds the immutable credential, the configured signing algorithm, and a
/// process-lifetime 8-character client id used as the request-id prefix.
/// Stateless across calls beyond those immutables; safe to share between
/// threads.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    algorithm: SignAlgorithm,
    client_id: String,
}

impl RequestSigner {
    /// Create a signer with the default algorithm (`HmacSHA1`) and a fresh
    /// random client id.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        let client_id = Uuid::new_v4().simple().to_string()[..8].to_owned();
        Self {
            credential,
            algorithm: SignAlgorithm::default(),
            client_id,
        }
    }

    /// Override the signing algorithm. Client and server must agree out of
    /// band; this is fixed configuration, not negotiated per request.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: SignAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// The credential this signer signs with.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The configured signing algorithm.
    #[must_use]
    pub fn algorithm(&self) -> SignAlgorithm {
        self.algorithm
    }

    /// Produce the full header set for one request against `uri`.
    ///
    /// Metadata headers are merged verbatim; the caller's map is not touched.
    /// A `Date` header (GMT, captured at call time to bound the server-side
    /// replay window), an optional `Content-Type`, and an
    /// `x-xiaomi-request-id` are injected before signing, so all three
    /// participate in the signature. The relative (path-and-query) form of
    /// `uri` is what gets signed.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidCredential`] or
    /// [`SignatureError::SigningFailure`] when signing fails, and
    /// [`SignatureError::SigningFailure`] when a header value is not a valid
    /// HTTP header string.
    pub fn prepare_request_headers(
        &self,
        uri: &Uri,
        method: &Method,
        media_type: Option<&str>,
        metadata: &HeaderMap,
    ) -> Result<HeaderMap, SignatureError> {
        let mut headers = metadata.clone();

        let date = format_gmt_date(Utc::now());
        headers.insert(header::DATE, to_header_value(&date)?);

        if let Some(media_type) = media_type {
            headers.insert(header::CONTENT_TYPE, to_header_value(media_type)?);
        }

        let request_id = self.unique_request_id();
        headers.insert(REQUEST_ID_HEADER, to_header_value(&request_id)?);

        let relative_uri = uri.path_and_query().map_or("/", |pq| pq.as_str());
        let signature = sign_to_base64(
            method,
            relative_uri,
            &headers,
            self.credential.access_secret(),
            self.algorithm,
        )?;

        let authorization = format!(
            "{AUTH_SCHEME} {}:{signature}",
            self.credential.access_id()
        );
        headers.insert(header::AUTHORIZATION, to_header_value(&authorization)?);

        debug!(%method, relative_uri, request_id, "prepared signed request headers");
        Ok(headers)
    }

    /// Concatenate the process-lifetime client id with a fresh random integer.
    /// Collisions are tolerable; this id exists for tracing, not security.
    fn unique_request_id(&self) -> String {
        format!("{}_{}", self.client_id, rand::rng().random::<u32>())
    }
}

/// Format a timestamp in the fixed FDS date pattern, always in GMT:
/// `Tue, 01 Jan 2019 00:00:00 GMT`.
#[must_use]
pub fn format_gmt_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn to_header_value(value: &str) -> Result<HeaderValue, SignatureError> {
    HeaderValue::from_str(value).map_err(|e| SignatureError::SigningFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn test_signer() -> RequestSigner {
        RequestSigner::new(Credential::new("AK123", "SK456").unwrap())
    }

    fn bucket_uri() -> Uri {
        "https://files.fds.api.xiaomi.com/mybucket".parse().unwrap()
    }

    #[test]
    fn test_should_format_date_in_gmt() {
        let time = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_gmt_date(time), "Tue, 01 Jan 2019 00:00:00 GMT");
    }

    #[test]
    fn test_should_inject_date_request_id_and_authorization() {
        let headers = test_signer()
            .prepare_request_headers(&bucket_uri(), &Method::GET, None, &HeaderMap::new())
            .unwrap();

        assert!(headers.contains_key(header::DATE));
        assert!(headers.contains_key(REQUEST_ID_HEADER));
        let auth = headers[header::AUTHORIZATION].to_str().unwrap();
        assert!(auth.starts_with("Galaxy-V2 AK123:"));
    }

    #[test]
    fn test_should_produce_verifiable_authorization_header() {
        let signer = test_signer();
        let headers = signer
            .prepare_request_headers(&bucket_uri(), &Method::GET, None, &HeaderMap::new())
            .unwrap();

        // Recompute the signature over the assembled headers; the header
        // value must match exactly.
        let expected = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &headers,
            "SK456",
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(
            headers[header::AUTHORIZATION].to_str().unwrap(),
            format!("Galaxy-V2 AK123:{expected}")
        );
    }

    #[test]
    fn test_should_set_content_type_from_media_type() {
        let headers = test_signer()
            .prepare_request_headers(
                &bucket_uri(),
                &Method::PUT,
                Some("application/json"),
                &HeaderMap::new(),
            )
            .unwrap();
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_should_merge_metadata_without_mutating_caller_map() {
        let mut metadata = HeaderMap::new();
        metadata.insert("x-xiaomi-meta-mode", HeaderValue::from_static("33188"));
        let before = metadata.clone();

        let headers = test_signer()
            .prepare_request_headers(&bucket_uri(), &Method::PUT, None, &metadata)
            .unwrap();

        assert_eq!(headers["x-xiaomi-meta-mode"], "33188");
        assert_eq!(metadata, before);
    }

    #[test]
    fn test_should_prefix_request_id_with_client_id() {
        let signer = test_signer();
        let headers = signer
            .prepare_request_headers(&bucket_uri(), &Method::GET, None, &HeaderMap::new())
            .unwrap();

        let request_id = headers[REQUEST_ID_HEADER].to_str().unwrap();
        let (prefix, suffix) = request_id.split_once('_').unwrap();
        assert_eq!(prefix.len(), 8);
        assert!(suffix.parse::<u32>().is_ok());
    }

    #[test]
    fn test_should_vary_request_id_per_call() {
        let signer = test_signer();
        let first = signer
            .prepare_request_headers(&bucket_uri(), &Method::GET, None, &HeaderMap::new())
            .unwrap();
        let second = signer
            .prepare_request_headers(&bucket_uri(), &Method::GET, None, &HeaderMap::new())
            .unwrap();
        assert_ne!(first[REQUEST_ID_HEADER], second[REQUEST_ID_HEADER]);
    }

    #[test]
    fn test_should_sign_path_and_query_only() {
        let uri: Uri = "https://files.fds.api.xiaomi.com/mybucket?acl"
            .parse()
            .unwrap();
        let headers = test_signer()
            .prepare_request_headers(&uri, &Method::GET, None, &HeaderMap::new())
            .unwrap();

        let expected = sign_to_base64(
            &Method::GET,
            "/mybucket?acl",
            &headers,
            "SK456",
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(
            headers[header::AUTHORIZATION].to_str().unwrap(),
            format!("Galaxy-V2 AK123:{expected}")
        );
    }
}

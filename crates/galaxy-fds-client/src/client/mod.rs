//! The FDS client and its shared request machinery.
//!
//! Every operation follows the same shape: format the operation URI, ask the
//! signing core for the signed header set, attach any unsigned query
//! parameters, invoke the HTTP verb, check the status, and decode the
//! response. The per-operation methods live in the `bucket` and `object`
//! submodules; this module holds the client itself and the shared send/check
//! helpers.

mod bucket;
mod object;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use galaxy_fds_auth::{
    Credential, RequestSigner, SubResource, generate_presigned_uri,
};
use http::{HeaderMap, Method, Uri};
use tracing::error;

use crate::config::FdsClientConfig;
use crate::error::{FdsError, FdsResult};
use crate::uri::{append_query, format_uri};

/// Bucket holding deleted objects until they are restored or expire.
pub const TRASH_BUCKET_NAME: &str = "trash";

/// Client for the Galaxy FDS object storage service.
///
/// Holds the immutable credential (inside the request signer), the endpoint
/// configuration, and a shared `reqwest` client. Cheap to clone; safe to use
/// concurrently.
///
/// # Examples
///
/// ```no_run
/// use galaxy_fds_auth::Credential;
/// use galaxy_fds_client::{FdsClientConfig, GalaxyFdsClient};
///
/// # async fn run() -> Result<(), galaxy_fds_client::FdsError> {
/// let credential = Credential::new("AK123", "SK456")?;
/// let client = GalaxyFdsClient::new(credential, FdsClientConfig::default());
/// let buckets = client.list_buckets().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GalaxyFdsClient {
    config: FdsClientConfig,
    signer: RequestSigner,
    http: reqwest::Client,
}

impl GalaxyFdsClient {
    /// Create a client with a default `reqwest` transport.
    #[must_use]
    pub fn new(credential: Credential, config: FdsClientConfig) -> Self {
        Self {
            config,
            signer: RequestSigner::new(credential),
            http: reqwest::Client::new(),
        }
    }

    /// Use a caller-configured transport (timeouts, proxies, TLS).
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// The endpoint configuration.
    #[must_use]
    pub fn config(&self) -> &FdsClientConfig {
        &self.config
    }

    /// Generate an unsigned download URI for a public object.
    ///
    /// # Errors
    ///
    /// Returns [`FdsError::InvalidUri`] if the configured download base URI is
    /// malformed.
    pub fn generate_download_object_uri(&self, bucket: &str, object: &str) -> FdsResult<Uri> {
        format_uri(
            &self.config.download_base_uri(),
            &format!("{bucket}/{object}"),
            &[],
        )
    }

    /// Generate a presigned URI for one operation on an object, valid until
    /// `expiration`.
    ///
    /// # Errors
    ///
    /// Returns [`FdsError::Signature`] when the base URI is malformed or
    /// signing fails.
    pub fn generate_presigned_uri(
        &self,
        bucket: &str,
        object: &str,
        expiration: DateTime<Utc>,
        method: Method,
    ) -> FdsResult<Uri> {
        self.presign(&self.config.base_uri(), bucket, object, &[], expiration, method)
    }

    /// Like [`generate_presigned_uri`](Self::generate_presigned_uri), against
    /// the CDN endpoint.
    pub fn generate_presigned_cdn_uri(
        &self,
        bucket: &str,
        object: &str,
        expiration: DateTime<Utc>,
        method: Method,
    ) -> FdsResult<Uri> {
        self.presign(
            &self.config.cdn_base_uri(),
            bucket,
            object,
            &[],
            expiration,
            method,
        )
    }

    /// Generate a presigned URI scoped to specific sub-resources (e.g. a
    /// time-limited link to read an object's ACL).
    pub fn generate_presigned_uri_with_sub_resources(
        &self,
        bucket: &str,
        object: &str,
        sub_resources: &[SubResource],
        expiration: DateTime<Utc>,
        method: Method,
    ) -> FdsResult<Uri> {
        self.presign(
            &self.config.base_uri(),
            bucket,
            object,
            sub_resources,
            expiration,
            method,
        )
    }

    fn presign(
        &self,
        base_uri: &str,
        bucket: &str,
        object: &str,
        sub_resources: &[SubResource],
        expiration: DateTime<Utc>,
        method: Method,
    ) -> FdsResult<Uri> {
        let uri = generate_presigned_uri(
            base_uri,
            bucket,
            object,
            sub_resources,
            expiration,
            &method,
            self.signer.credential(),
            self.signer.algorithm(),
        )?;
        Ok(uri)
    }

    /// Sign and send one request; the response status is not yet checked.
    pub(crate) async fn send(
        &self,
        method: Method,
        uri: &Uri,
        extra_query: &[(&str, &str)],
        media_type: Option<&str>,
        metadata: &HeaderMap,
        body: Option<Bytes>,
    ) -> FdsResult<reqwest::Response> {
        let headers = self
            .signer
            .prepare_request_headers(uri, &method, media_type, metadata)?;
        let target = append_query(uri, extra_query)?;

        let mut request = self
            .http
            .request(method, target.to_string())
            .headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        Ok(request.send().await?)
    }

    /// Sign, send, and require a success status.
    pub(crate) async fn execute(
        &self,
        operation: &'static str,
        method: Method,
        uri: &Uri,
        extra_query: &[(&str, &str)],
        media_type: Option<&str>,
        metadata: &HeaderMap,
        body: Option<Bytes>,
    ) -> FdsResult<reqwest::Response> {
        let response = self
            .send(method, uri, extra_query, media_type, metadata, body)
            .await?;
        expect_success(operation, response).await
    }

    pub(crate) fn base_uri(&self) -> String {
        self.config.base_uri()
    }

    pub(crate) fn upload_base_uri(&self) -> String {
        self.config.upload_base_uri()
    }
}

/// Turn a non-success response into [`FdsError::ServerError`], consuming the
/// body as the reason.
pub(crate) async fn expect_success(
    operation: &'static str,
    response: reqwest::Response,
) -> FdsResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = response.text().await.unwrap_or_default();
    error!(operation, status = status.as_u16(), reason, "FDS request failed");
    Err(FdsError::ServerError {
        operation,
        status: status.as_u16(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn test_client() -> GalaxyFdsClient {
        GalaxyFdsClient::new(
            Credential::new("AK123", "SK456").unwrap(),
            FdsClientConfig::default(),
        )
    }

    #[test]
    fn test_should_generate_download_uri_against_cdn() {
        let uri = test_client()
            .generate_download_object_uri("b", "o.txt")
            .unwrap();
        assert_eq!(uri.to_string(), "https://cdn.fds.api.xiaomi.com/b/o.txt");
    }

    #[test]
    fn test_should_route_download_off_cdn_when_toggle_disabled() {
        let client = GalaxyFdsClient::new(
            Credential::new("AK123", "SK456").unwrap(),
            FdsClientConfig::default().with_cdn_for_download(false),
        );
        let uri = client.generate_download_object_uri("b", "o.txt").unwrap();
        assert_eq!(uri.host(), Some("files.fds.api.xiaomi.com"));
    }

    #[test]
    fn test_should_generate_presigned_uri_with_auth_query() {
        let expiration = Utc.timestamp_opt(1_893_456_000, 0).unwrap();
        let uri = test_client()
            .generate_presigned_uri("b", "o.txt", expiration, Method::GET)
            .unwrap();
        let query = uri.query().unwrap();
        assert!(query.contains("GalaxyAccessId=AK123"));
        assert!(query.contains("Expires=1893456000"));
        assert!(query.contains("Signature="));
    }

    #[tokio::test]
    async fn test_should_send_positional_read_through_download_endpoint() {
        // Offset reads build a Range header and go out via the download
        // endpoint; against a refused port this surfaces as a transport
        // error, not a signing or header-encoding error.
        let client = GalaxyFdsClient::new(
            Credential::new("AK123", "SK456").unwrap(),
            FdsClientConfig::default().with_endpoint("http://127.0.0.1:1"),
        );
        let result = client.get_object_starting_at("b", "o.txt", 1024).await;
        assert!(matches!(result, Err(FdsError::Transport(_))));
    }

    #[tokio::test]
    async fn test_should_surface_transport_error_for_unreachable_endpoint() {
        // Port 1 on loopback refuses connections; the signed request must
        // fail with a transport error, not a signing error.
        let client = GalaxyFdsClient::new(
            Credential::new("AK123", "SK456").unwrap(),
            FdsClientConfig::default().with_endpoint("http://127.0.0.1:1"),
        );
        let result = client.list_buckets().await;
        assert!(matches!(result, Err(FdsError::Transport(_))));
    }

    #[test]
    fn test_should_generate_presigned_cdn_uri_against_cdn_host() {
        let expiration = Utc.timestamp_opt(1_893_456_000, 0).unwrap();
        let uri = test_client()
            .generate_presigned_cdn_uri("b", "o.txt", expiration, Method::GET)
            .unwrap();
        assert_eq!(uri.host(), Some("cdn.fds.api.xiaomi.com"));
    }
}

//! Client configuration and endpoint derivation.

/// Configuration for [`GalaxyFdsClient`](crate::GalaxyFdsClient).
///
/// Endpoints are derived from the region name and the https/CDN toggles; an
/// explicit endpoint override short-circuits the derivation (useful against a
/// local test server). Transport-level policy (timeouts, pooling, TLS) is
/// configured on the `reqwest` client, not here.
///
/// # Examples
///
/// ```
/// use galaxy_fds_client::FdsClientConfig;
///
/// let config = FdsClientConfig::default().with_region_name("cnbj0");
/// assert_eq!(config.base_uri(), "https://cnbj0.fds.api.xiaomi.com");
/// ```
#[derive(Debug, Clone)]
pub struct FdsClientConfig {
    region_name: String,
    enable_https: bool,
    enable_cdn_for_upload: bool,
    enable_cdn_for_download: bool,
    endpoint: Option<String>,
}

const URI_SUFFIX: &str = "fds.api.xiaomi.com";
const URI_FILES: &str = "files";
const URI_CDN: &str = "cdn";

impl Default for FdsClientConfig {
    fn default() -> Self {
        Self {
            region_name: String::new(),
            enable_https: true,
            enable_cdn_for_upload: false,
            enable_cdn_for_download: true,
            endpoint: None,
        }
    }
}

impl FdsClientConfig {
    /// Set the region name (empty means the default region).
    #[must_use]
    pub fn with_region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = region_name.into();
        self
    }

    /// Toggle https for derived endpoints.
    #[must_use]
    pub fn with_https(mut self, enable_https: bool) -> Self {
        self.enable_https = enable_https;
        self
    }

    /// Route uploads through the CDN endpoint.
    #[must_use]
    pub fn with_cdn_for_upload(mut self, enable: bool) -> Self {
        self.enable_cdn_for_upload = enable;
        self
    }

    /// Route downloads through the CDN endpoint.
    #[must_use]
    pub fn with_cdn_for_download(mut self, enable: bool) -> Self {
        self.enable_cdn_for_download = enable;
        self
    }

    /// Override every derived endpoint with an explicit base URI.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load configuration from `FDS_REGION`, `FDS_ENDPOINT`, and
    /// `FDS_ENABLE_HTTPS` environment variables, on top of the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("FDS_REGION") {
            config.region_name = v;
        }
        if let Ok(v) = std::env::var("FDS_ENDPOINT") {
            config.endpoint = Some(v);
        }
        if let Ok(v) = std::env::var("FDS_ENABLE_HTTPS") {
            config.enable_https = v == "1" || v.eq_ignore_ascii_case("true");
        }
        config
    }

    /// The base URI used for bucket and object operations.
    #[must_use]
    pub fn base_uri(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }
        self.build_base_uri(false)
    }

    /// The CDN base URI.
    #[must_use]
    pub fn cdn_base_uri(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }
        self.build_base_uri(true)
    }

    /// The base URI for uploads, honoring the CDN-for-upload toggle.
    #[must_use]
    pub fn upload_base_uri(&self) -> String {
        if self.enable_cdn_for_upload {
            self.cdn_base_uri()
        } else {
            self.base_uri()
        }
    }

    /// The base URI for downloads, honoring the CDN-for-download toggle.
    #[must_use]
    pub fn download_base_uri(&self) -> String {
        if self.enable_cdn_for_download {
            self.cdn_base_uri()
        } else {
            self.base_uri()
        }
    }

    fn build_base_uri(&self, cdn: bool) -> String {
        let scheme = if self.enable_https { "https" } else { "http" };
        let host = match (cdn, self.region_name.is_empty()) {
            (false, true) => format!("{URI_FILES}.{URI_SUFFIX}"),
            (false, false) => format!("{}.{URI_SUFFIX}", self.region_name),
            (true, true) => format!("{URI_CDN}.{URI_SUFFIX}"),
            (true, false) => format!("{URI_CDN}.{}.{URI_SUFFIX}", self.region_name),
        };
        format!("{scheme}://{host}")
    }
}

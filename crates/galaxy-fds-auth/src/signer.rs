//! HMAC computation and algorithm selection for Galaxy-V2 signing.
//!
//! The algorithm backing the MAC is a fixed configuration agreed with the
//! server out of band; it is never guessed or negotiated per request. The FDS
//! service uses `HmacSHA1` in its `Galaxy-V2` scheme.

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use http::{HeaderMap, Method, header};
use sha1::Sha1;
use sha2::Sha256;
use tracing::debug;

use crate::canonical::build_string_to_sign;
use crate::error::SignatureError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// The keyed hash function backing the MAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignAlgorithm {
    /// HMAC-SHA1, the algorithm of the `Galaxy-V2` scheme.
    #[default]
    HmacSha1,
    /// HMAC-SHA256.
    HmacSha256,
}

impl SignAlgorithm {
    /// The algorithm name as configured on the server side.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignAlgorithm::HmacSha1 => "HmacSHA1",
            SignAlgorithm::HmacSha256 => "HmacSHA256",
        }
    }
}

impl FromStr for SignAlgorithm {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HmacSHA1" => Ok(SignAlgorithm::HmacSha1),
            "HmacSHA256" => Ok(SignAlgorithm::HmacSha256),
            other => Err(SignatureError::UnsupportedSignAlgorithm(other.to_owned())),
        }
    }
}

/// Compute the raw MAC over `data` keyed by `secret`.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidCredential`] if the secret is empty, or
/// [`SignatureError::SigningFailure`] if the MAC cannot be initialized.
pub fn sign(
    data: &str,
    secret: &str,
    algorithm: SignAlgorithm,
) -> Result<Vec<u8>, SignatureError> {
    if secret.is_empty() {
        return Err(SignatureError::InvalidCredential);
    }

    let mac = match algorithm {
        SignAlgorithm::HmacSha1 => {
            let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
                .map_err(|e| SignatureError::SigningFailure(e.to_string()))?;
            mac.update(data.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignAlgorithm::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .map_err(|e| SignatureError::SigningFailure(e.to_string()))?;
            mac.update(data.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(mac)
}

/// Sign a pending header-mode request and return the base64 signature text.
///
/// The request's `Date` header is folded into the canonical string as the
/// timestamp line. Base64 encoding is applied here and nowhere else; callers
/// must not re-encode the result.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidCredential`] for an empty secret, or
/// [`SignatureError::SigningFailure`] if the MAC computation fails.
///
/// # Examples
///
/// ```
/// use galaxy_fds_auth::signer::{SignAlgorithm, sign_to_base64};
///
/// let mut headers = http::HeaderMap::new();
/// headers.insert(
///     http::header::DATE,
///     http::HeaderValue::from_static("Tue, 01 Jan 2019 00:00:00 GMT"),
/// );
/// let signature = sign_to_base64(
///     &http::Method::GET,
///     "/mybucket",
///     &headers,
///     "SK456",
///     SignAlgorithm::HmacSha1,
/// )
/// .unwrap();
/// assert_eq!(signature, "YtZUw4aFyCeosetdagM8ximKkj8=");
/// ```
pub fn sign_to_base64(
    method: &Method,
    relative_uri: &str,
    headers: &HeaderMap,
    secret: &str,
    algorithm: SignAlgorithm,
) -> Result<String, SignatureError> {
    let date = headers
        .get(header::DATE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let string_to_sign = build_string_to_sign(method, relative_uri, headers, date);
    debug!(%method, relative_uri, "built string to sign");

    let signature = sign(&string_to_sign, secret, algorithm)?;
    Ok(BASE64.encode(signature))
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    const TEST_SECRET: &str = "SK456";
    const TEST_DATE: &str = "Tue, 01 Jan 2019 00:00:00 GMT";

    fn dated_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::DATE, HeaderValue::from_static(TEST_DATE));
        headers
    }

    #[test]
    fn test_should_match_golden_signature_for_get_bucket() {
        let signature = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(signature, "YtZUw4aFyCeosetdagM8ximKkj8=");
    }

    #[test]
    fn test_should_change_signature_when_sub_resource_added() {
        let plain = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        let with_acl = sign_to_base64(
            &Method::GET,
            "/mybucket?acl",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(with_acl, "1bv6wGrNK7GyAccMgC+t8GCtFU8=");
        assert_ne!(plain, with_acl);
    }

    #[test]
    fn test_should_match_golden_signature_with_xiaomi_headers() {
        let mut headers = dated_headers();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert("x-xiaomi-meta-mode", HeaderValue::from_static("33188"));
        headers.insert(
            "x-xiaomi-request-id",
            HeaderValue::from_static("8f2d1c3a_42"),
        );

        let signature = sign_to_base64(
            &Method::PUT,
            "/mybucket/obj",
            &headers,
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(signature, "4yHHEPNJ2Heqj6jjpqYFAuituqE=");
    }

    #[test]
    fn test_should_match_golden_signature_for_hmac_sha256() {
        let signature = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha256,
        )
        .unwrap();
        assert_eq!(signature, "RWMM+0DDTBTgwtkuCuCFlPIn89f+JMuvkzdqecs8gJ4=");
    }

    #[test]
    fn test_should_be_deterministic_across_invocations() {
        let first = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        for _ in 0..10 {
            let again = sign_to_base64(
                &Method::GET,
                "/mybucket",
                &dated_headers(),
                TEST_SECRET,
                SignAlgorithm::HmacSha1,
            )
            .unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_should_be_sensitive_to_every_canonical_field() {
        let base = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();

        let other_method = sign_to_base64(
            &Method::PUT,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_ne!(base, other_method);

        let other_path = sign_to_base64(
            &Method::GET,
            "/otherbucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_ne!(base, other_path);

        let mut other_date = HeaderMap::new();
        other_date.insert(
            header::DATE,
            HeaderValue::from_static("Wed, 02 Jan 2019 00:00:00 GMT"),
        );
        let other_timestamp = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &other_date,
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_ne!(base, other_timestamp);
    }

    #[test]
    fn test_should_ignore_headers_outside_signed_set() {
        let mut noisy = dated_headers();
        noisy.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        noisy.insert(header::USER_AGENT, HeaderValue::from_static("galaxy-fds"));

        let clean = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        let with_noise = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &noisy,
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(clean, with_noise);
    }

    #[test]
    fn test_should_sign_identically_for_reordered_sub_resources() {
        let a = sign_to_base64(
            &Method::GET,
            "/b/o?acl&quota",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        let b = sign_to_base64(
            &Method::GET,
            "/b/o?quota&acl",
            &dated_headers(),
            TEST_SECRET,
            SignAlgorithm::HmacSha1,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_should_reject_empty_secret() {
        let result = sign_to_base64(
            &Method::GET,
            "/mybucket",
            &dated_headers(),
            "",
            SignAlgorithm::HmacSha1,
        );
        assert!(matches!(result, Err(SignatureError::InvalidCredential)));
    }

    #[test]
    fn test_should_parse_known_algorithm_names() {
        assert_eq!(
            "HmacSHA1".parse::<SignAlgorithm>().unwrap(),
            SignAlgorithm::HmacSha1
        );
        assert_eq!(
            "HmacSHA256".parse::<SignAlgorithm>().unwrap(),
            SignAlgorithm::HmacSha256
        );
    }

    #[test]
    fn test_should_reject_unknown_algorithm_name() {
        let result = "HmacMD4".parse::<SignAlgorithm>();
        assert!(matches!(
            result,
            Err(SignatureError::UnsupportedSignAlgorithm(name)) if name == "HmacMD4"
        ));
    }

    #[test]
    fn test_should_sign_concurrently_without_interference() {
        let expected: Vec<String> = (0..8)
            .map(|i| {
                sign_to_base64(
                    &Method::GET,
                    &format!("/bucket-{i}"),
                    &dated_headers(),
                    TEST_SECRET,
                    SignAlgorithm::HmacSha1,
                )
                .unwrap()
            })
            .collect();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    sign_to_base64(
                        &Method::GET,
                        &format!("/bucket-{i}"),
                        &dated_headers(),
                        TEST_SECRET,
                        SignAlgorithm::HmacSha1,
                    )
                    .unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), expected[i]);
        }
    }
}

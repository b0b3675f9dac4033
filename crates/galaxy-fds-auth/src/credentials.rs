//! The immutable FDS credential pair.

use std::fmt;

use crate::error::SignatureError;

/// An access-id/access-secret pair issued by the Galaxy FDS service.
///
/// Immutable for the lifetime of a client. The secret participates only as
/// HMAC key material; it is never placed in the canonical string, transmitted
/// headers, or log output. The `Debug` implementation redacts it.
///
/// # Examples
///
/// ```
/// use galaxy_fds_auth::Credential;
///
/// let credential = Credential::new("AK123", "SK456").unwrap();
/// assert_eq!(credential.access_id(), "AK123");
/// ```
#[derive(Clone)]
pub struct Credential {
    access_id: String,
    access_secret: String,
}

impl Credential {
    /// Create a credential from an access id and an access secret.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidCredential`] if either component is
    /// empty.
    pub fn new(
        access_id: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Result<Self, SignatureError> {
        let access_id = access_id.into();
        let access_secret = access_secret.into();
        if access_id.is_empty() || access_secret.is_empty() {
            return Err(SignatureError::InvalidCredential);
        }
        Ok(Self {
            access_id,
            access_secret,
        })
    }

    /// The public access id, sent verbatim in `Authorization` headers and
    /// presigned query strings.
    #[must_use]
    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    /// The secret key material. Only ever fed into the MAC.
    #[must_use]
    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_id", &self.access_id)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

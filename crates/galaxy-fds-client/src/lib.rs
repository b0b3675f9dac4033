//! Client for the Galaxy FDS object storage service.
//!
//! This crate is the thin plumbing layer over the signing core in
//! `galaxy-fds-auth`: every operation formats a URI, obtains a signed header
//! set (or a presigned URI), invokes the HTTP verb via `reqwest`, checks the
//! status, and decodes the JSON response into the value objects from
//! `galaxy-fds-model`.
//!
//! Retry/backoff, connection pooling, and TLS configuration belong to the
//! transport; configure them on the `reqwest::Client` passed to
//! [`GalaxyFdsClient::with_http_client`].
//!
//! # Usage
//!
//! ```no_run
//! use galaxy_fds_auth::Credential;
//! use galaxy_fds_client::{FdsClientConfig, GalaxyFdsClient};
//!
//! # async fn run() -> Result<(), galaxy_fds_client::FdsError> {
//! let credential = Credential::new("AK123", "SK456")?;
//! let config = FdsClientConfig::default().with_region_name("cnbj0");
//! let client = GalaxyFdsClient::new(credential, config);
//!
//! client.create_bucket("mybucket").await?;
//! let listing = client.list_objects("mybucket", "", "/").await?;
//! println!("{} objects", listing.objects.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The client and its per-operation methods
//! - [`config`] - Endpoint configuration
//! - [`error`] - The client-facing error type
//! - [`uri`] - Operation URI formatting

pub mod client;
pub mod config;
pub mod error;
pub mod uri;

pub use client::{GalaxyFdsClient, TRASH_BUCKET_NAME};
pub use config::FdsClientConfig;
pub use error::{FdsError, FdsResult};
pub use uri::format_uri;

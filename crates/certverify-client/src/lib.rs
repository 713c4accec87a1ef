//! # certverify-client -- HTTP Client for Certificate Verification
//!
//! Typed async access to a certificate service exposing two endpoints:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/certificates/{id}` | [`CertificateClient::lookup`] |
//! | POST   | `/api/certificates` | [`CertificateClient::register`] |
//!
//! [`CertificateController`] layers session state on top: the configured
//! base URL and bearer token, the lookup input, the registration form, and
//! one [`OperationState`](certverify_core::OperationState) per operation.
//!
//! ## Failure Model
//!
//! Every call is a single attempt. There is no automatic retry; the caller
//! resubmits explicitly. See [`CertApiError`] for the taxonomy.

pub mod certificates;
pub mod config;
pub mod controller;
pub mod error;

pub use certificates::{CertificateClient, VerifiedCertificate, DEFAULT_UPLOAD_MESSAGE};
pub use config::{ApiBase, ClientConfig, ConfigError, DEFAULT_API_BASE};
pub use controller::CertificateController;
pub use error::CertApiError;

use std::time::Duration;

/// Build the shared `reqwest` client.
///
/// `timeout_secs` of `None` leaves requests unbounded; they run until the
/// transport itself gives up.
pub(crate) fn build_http(timeout_secs: Option<u64>) -> Result<reqwest::Client, CertApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().map_err(|e| CertApiError::network("client_init", e))
}

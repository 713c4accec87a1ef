//! Typed client for the certificate service.
//!
//! ## Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/certificates/{id}` | Look up by identifier |
//! | POST   | `/api/certificates` | Register a new certificate |
//!
//! Both paths are relative to the configured [`ApiBase`], which may itself
//! carry a path prefix.

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;

use certverify_core::{
    CertificateForm, CertificateId, CertificateView, RegistrationRequest, ValidationError,
};

use crate::config::{ApiBase, ClientConfig};
use crate::error::CertApiError;

/// Collection path segments under the base URL.
const CERTIFICATES_PATH: [&str; 2] = ["api", "certificates"];

/// Success message when a registration response has an empty body.
pub const DEFAULT_UPLOAD_MESSAGE: &str = "Upload successful.";

/// A certificate returned by a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedCertificate {
    /// Response body exactly as decoded.
    pub raw: Value,
    /// Resolved display fields.
    pub view: CertificateView,
}

impl VerifiedCertificate {
    pub fn from_json(raw: Value) -> Self {
        let view = CertificateView::from_json(&raw);
        Self { raw, view }
    }
}

/// Client for the certificate lookup and registration endpoints.
#[derive(Debug, Clone)]
pub struct CertificateClient {
    http: reqwest::Client,
    api_base: ApiBase,
}

impl CertificateClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, CertApiError> {
        let http = crate::build_http(config.timeout_secs)?;
        Ok(Self::with_http(http, config.api_base.clone()))
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_http(http: reqwest::Client, api_base: ApiBase) -> Self {
        Self { http, api_base }
    }

    pub fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// Look up a certificate by identifier.
    ///
    /// Calls `GET {base}/api/certificates/{id}`. The identifier is trimmed
    /// and must be non-empty; otherwise no request is sent.
    pub async fn lookup(&self, id: &str) -> Result<VerifiedCertificate, CertApiError> {
        let id = CertificateId::parse(id)?;
        let endpoint = format!("GET /api/certificates/{id}");
        let url = self
            .api_base
            .endpoint(&[CERTIFICATES_PATH[0], CERTIFICATES_PATH[1], id.as_str()])?;

        tracing::debug!(%url, "looking up certificate");
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| network_failure(&endpoint, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| network_failure(&endpoint, e))?;

        if !status.is_success() {
            let err = remote_failure(&endpoint, status, body, "Request failed with");
            tracing::warn!(%endpoint, status = status.as_u16(), "certificate lookup rejected: {err}");
            return Err(err);
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| CertApiError::Decode {
            endpoint: endpoint.clone(),
            source: e,
        })?;
        tracing::info!(certificate_id = %id, "certificate verified");
        Ok(VerifiedCertificate::from_json(raw))
    }

    /// Register a certificate from raw form input.
    ///
    /// Trims every field and requires `id` and `name` before sending.
    pub async fn register(
        &self,
        form: &CertificateForm,
        token: Option<&str>,
    ) -> Result<String, CertApiError> {
        let request = form.to_request()?;
        self.register_request(&request, token).await
    }

    /// Register an already-validated request.
    ///
    /// Calls `POST {base}/api/certificates`. A non-blank `token` is sent as
    /// `Authorization: Bearer {token}`. Returns the response body as the
    /// success message, or [`DEFAULT_UPLOAD_MESSAGE`] when it is empty.
    pub async fn register_request(
        &self,
        request: &RegistrationRequest,
        token: Option<&str>,
    ) -> Result<String, CertApiError> {
        let endpoint = "POST /api/certificates";
        let url = self.api_base.endpoint(&CERTIFICATES_PATH)?;
        let auth = token.map(bearer_header).transpose()?.flatten();

        tracing::debug!(%url, certificate_id = request.id(), authorized = auth.is_some(), "registering certificate");
        let mut builder = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .json(request);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| network_failure(endpoint, e))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| network_failure(endpoint, e))?;

        if !status.is_success() {
            let err = remote_failure(endpoint, status, body, "Upload failed with");
            tracing::warn!(endpoint, status = status.as_u16(), "certificate registration rejected: {err}");
            return Err(err);
        }

        tracing::info!(certificate_id = request.id(), "certificate registered");
        if body.is_empty() {
            Ok(DEFAULT_UPLOAD_MESSAGE.to_string())
        } else {
            Ok(body)
        }
    }
}

/// `Authorization` header for a token; `None` when the token is blank.
fn bearer_header(token: &str) -> Result<Option<HeaderValue>, ValidationError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ValidationError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(Some(value))
}

fn network_failure(endpoint: &str, source: reqwest::Error) -> CertApiError {
    let err = CertApiError::network(endpoint, source);
    tracing::warn!(endpoint, "certificate service unreachable: {err}");
    err
}

/// Non-2xx response: body verbatim, or `"{fallback} {status}"` when empty.
fn remote_failure(
    endpoint: &str,
    status: reqwest::StatusCode,
    body: String,
    fallback: &str,
) -> CertApiError {
    let message = if body.is_empty() {
        format!("{fallback} {}", status.as_u16())
    } else {
        body
    };
    CertApiError::Remote {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_skips_blank_tokens() {
        assert!(bearer_header("").unwrap().is_none());
        assert!(bearer_header("   ").unwrap().is_none());
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let value = bearer_header(" abc123 ").unwrap().unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer abc123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn bearer_header_rejects_control_characters() {
        assert_eq!(
            bearer_header("abc\ndef"),
            Err(ValidationError::InvalidToken)
        );
    }

    #[test]
    fn remote_failure_falls_back_to_status() {
        let err = remote_failure(
            "GET /api/certificates/X1",
            reqwest::StatusCode::BAD_GATEWAY,
            String::new(),
            "Request failed with",
        );
        assert_eq!(err.to_string(), "Request failed with 502");
    }
}

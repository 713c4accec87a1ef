//! Client configuration.
//!
//! The base URL defaults to a local development service. Override via
//! environment variables, CLI flags, or at runtime through
//! [`CertificateController::set_api_base`](crate::CertificateController::set_api_base).

use url::Url;
use zeroize::Zeroizing;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:4000";

pub const API_BASE_VAR: &str = "CERTVERIFY_API_BASE";
pub const API_TOKEN_VAR: &str = "CERTVERIFY_API_TOKEN";
pub const TIMEOUT_VAR: &str = "CERTVERIFY_TIMEOUT_SECS";

/// A validated service base URL.
///
/// # Invariants
///
/// - Absolute `http` or `https` URL that can carry path segments.
/// - The textual form has no surrounding whitespace and no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    url: Url,
    text: String,
}

impl ApiBase {
    /// Trim, strip trailing slashes, and validate.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let text = raw.trim().trim_end_matches('/');
        if text.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let url =
            Url::parse(text).map_err(|e| ConfigError::InvalidUrl(text.to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                text.to_string(),
                "URL cannot carry a path".to_string(),
            ));
        }
        Ok(Self {
            url,
            text: text.to_string(),
        })
    }

    /// The normalized base as entered, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Append percent-encoded path segments to the base path.
    ///
    /// Each segment is encoded individually, so a `/` inside a segment
    /// becomes `%2F` rather than a path separator. Any query or fragment
    /// on the base is dropped.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| {
                ConfigError::InvalidUrl(self.text.clone(), "URL cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl std::fmt::Display for ApiBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Configuration for [`CertificateClient`](crate::CertificateClient) and
/// [`CertificateController`](crate::CertificateController).
///
/// Custom `Debug` implementation redacts the `api_token` field.
#[derive(Clone)]
pub struct ClientConfig {
    /// Service base URL.
    pub api_base: ApiBase,
    /// Bearer token sent with registration requests.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds. `None` means no timeout.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration with the given base, no token and no timeout.
    pub fn new(api_base: ApiBase) -> Self {
        Self {
            api_base,
            api_token: None,
            timeout_secs: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CERTVERIFY_API_BASE` (default: `http://localhost:4000`)
    /// - `CERTVERIFY_API_TOKEN` (optional)
    /// - `CERTVERIFY_TIMEOUT_SECS` (optional; unset means no timeout)
    ///
    /// Blank values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup, e.g. the process
    /// environment or already-parsed command-line values.
    ///
    /// An unparseable timeout is ignored with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let raw_base = non_blank(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let mut config = Self::new(ApiBase::parse(&raw_base)?);
        config.api_token = normalize_token(var(API_TOKEN_VAR));
        config.timeout_secs = non_blank(TIMEOUT_VAR).and_then(|raw| match raw.trim().parse() {
            Ok(secs) => Some(secs),
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring invalid {TIMEOUT_VAR}; requests will not time out");
                None
            }
        });
        Ok(config)
    }

    /// Configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new(ApiBase::parse(base_url)?);
        config.timeout_secs = Some(5);
        Ok(config)
    }
}

/// Trim a raw token; blank input means "no token".
pub fn normalize_token(raw: Option<String>) -> Option<Zeroizing<String>> {
    let raw = Zeroizing::new(raw?);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Zeroizing::new(trimmed.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL must not be empty")]
    EmptyBaseUrl,
    #[error("invalid API base URL {0}: {1}")]
    InvalidUrl(String, String),
    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

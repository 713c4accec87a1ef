//! Certificate API error types.

use std::error::Error as _;

use certverify_core::{FailureKind, OperationFailure, ValidationError};

use crate::config::ConfigError;

/// Errors from certificate API calls.
///
/// `Display` is the user-facing message: for [`CertApiError::Remote`] it is
/// the response body verbatim (or a status fallback), for
/// [`CertApiError::Network`] the underlying transport description.
#[derive(Debug, thiserror::Error)]
pub enum CertApiError {
    /// Local input was rejected before any request was built.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The service returned a non-2xx status.
    #[error("{message}")]
    Remote {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// HTTP transport error.
    #[error("{message}")]
    Network {
        endpoint: String,
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response body was not valid JSON.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A submission of the same kind is still in flight.
    #[error("a {operation} request is already in progress")]
    Busy { operation: &'static str },
}

impl CertApiError {
    /// Wrap a transport failure, flattening its cause chain into the message.
    pub(crate) fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            message: describe_transport(&source),
            source,
        }
    }

    /// HTTP status for remote failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Snapshot suitable for [`certverify_core::OperationState::Failed`].
    pub fn to_failure(&self) -> OperationFailure {
        let kind = match self {
            Self::Validation(_) | Self::Config(_) | Self::Busy { .. } => FailureKind::Validation,
            Self::Remote { status, .. } => FailureKind::Remote { status: *status },
            Self::Network { .. } => FailureKind::Network,
            Self::Decode { .. } => FailureKind::Decode,
        };
        OperationFailure::new(kind, self.to_string())
    }
}

/// `reqwest` reports "error sending request" at the top level and the useful
/// part (connection refused, DNS failure, timeout) further down the chain.
fn describe_transport(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}

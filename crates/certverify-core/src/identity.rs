//! # Certificate Identifier
//!
//! The lookup key for a certificate record. Validated at construction: the
//! only way to obtain a [`CertificateId`] is through [`CertificateId::parse`],
//! which trims surrounding whitespace and rejects the empty result.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A caller-supplied certificate identifier, e.g. `SUST-2020-0001`.
///
/// # Invariants
///
/// - Never empty.
/// - Never carries leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CertificateId(String);

impl CertificateId {
    /// Trim and validate a raw identifier.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingCertificateId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CertificateId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CertificateId> for String {
    fn from(id: CertificateId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

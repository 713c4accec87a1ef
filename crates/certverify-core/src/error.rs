//! # Validation Errors
//!
//! Local input failures. These are raised before any request is built, so a
//! `ValidationError` always means no network call was made.

use thiserror::Error;

/// Missing or malformed user input.
///
/// The `Display` text is the user-facing message shown by the controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Lookup submitted with an empty or whitespace-only identifier.
    #[error("Please enter a certificate ID.")]
    MissingCertificateId,

    /// Registration submitted without `id` or `name`.
    #[error("'id' and 'name' are required.")]
    MissingRequiredFields,

    /// Bearer token cannot be carried in an HTTP header value.
    #[error("bearer token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// Unknown registration form field name.
    #[error("unknown field '{0}' (expected one of: id, name, organization, program, cgpa, issueDate)")]
    UnknownField(String),
}

//! # certverify-core -- Domain Types for Certificate Verification
//!
//! Pure, I/O-free building blocks shared by the HTTP client and the CLI:
//!
//! - [`CertificateId`]: validated lookup key (non-empty after trimming).
//! - [`CertificateForm`] / [`RegistrationRequest`]: the registration input and
//!   its trimmed wire representation.
//! - [`CertificateView`]: display projection of an arbitrary lookup response,
//!   built from an ordered candidate-key table per field.
//! - [`OperationState`]: explicit `Idle` / `Pending` / `Succeeded` / `Failed`
//!   state for each controller operation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `certverify-*` crates.
//! - No network or filesystem access.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod record;
pub mod resolve;
pub mod state;

pub use error::ValidationError;
pub use identity::CertificateId;
pub use record::{CertificateForm, FormField, RegistrationRequest, SAMPLE_PAYLOAD};
pub use resolve::{CertificateView, FallbackRule, ViewField, PLACEHOLDER};
pub use state::{FailureKind, OperationFailure, OperationState};

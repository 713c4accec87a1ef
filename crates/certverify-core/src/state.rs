//! # Operation State
//!
//! Each controller operation (lookup, registration) is exactly one of
//! `Idle`, `Pending`, `Succeeded(value)` or `Failed(failure)`. Being busy and
//! holding a stale result at the same time is unrepresentable.
//!
//! ## Transitions
//!
//! ```text
//! Idle ──begin──▶ Pending ──settle──▶ Succeeded | Failed
//!   ▲                                     │
//!   └──────────── begin (reset) ◀─────────┘
//! ```
//!
//! `begin` on a `Pending` operation is refused and leaves it untouched.
//! `cancel` moves a `Pending` operation whose submission was dropped to
//! `Failed` with [`FailureKind::Cancelled`].

use std::fmt;

use crate::error::ValidationError;

/// Category of a settled failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Local input was rejected; no request was sent.
    Validation,
    /// The service answered with a non-2xx status.
    Remote { status: u16 },
    /// The request never produced a response.
    Network,
    /// A 2xx response body could not be decoded.
    Decode,
    /// The submission was dropped before a response arrived.
    Cancelled,
}

/// A failed operation attempt as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl OperationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for OperationFailure {
    fn from(err: &ValidationError) -> Self {
        Self::new(FailureKind::Validation, err.to_string())
    }
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// State of one controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState<T> {
    /// Never submitted.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last attempt succeeded.
    Succeeded(T),
    /// The last attempt failed.
    Failed(OperationFailure),
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> OperationState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The successful value, if settled successfully.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if settled with an error.
    pub fn failure(&self) -> Option<&OperationFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Move to `Pending`, discarding any previous outcome.
    ///
    /// Returns `false` without changing anything when already pending.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending;
        true
    }

    /// Record the outcome of the in-flight attempt.
    pub fn settle(&mut self, outcome: Result<T, OperationFailure>) {
        *self = match outcome {
            Ok(value) => Self::Succeeded(value),
            Err(failure) => Self::Failed(failure),
        };
    }

    /// Settle a still-pending operation as cancelled.
    ///
    /// No-op unless `Pending`.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            *self = Self::Failed(OperationFailure::new(
                FailureKind::Cancelled,
                "Request cancelled.",
            ));
        }
    }

    /// Short lowercase name, for logs and status output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

//! Plain-text rendering of certificates, forms and session status.

use std::fmt::Write as _;

use certverify_core::{CertificateForm, CertificateView, FormField, OperationState};

/// Multi-line certificate card.
pub fn certificate_card(view: &CertificateView) -> String {
    let mut out = String::from("Certificate [Verified]\n");
    for (field, value) in view.rows() {
        let _ = writeln!(out, "  {:<16}{value}", field.label());
    }
    out
}

/// The registration form, one field per line, blanks shown as `(empty)`.
pub fn form_summary(form: &CertificateForm) -> String {
    let mut out = String::new();
    for field in FormField::ALL {
        let value = form.get(field);
        let shown = if value.is_empty() { "(empty)" } else { value };
        let _ = writeln!(out, "  {:<14}{shown}", field.label());
    }
    out
}

/// One-word state with the failure message when there is one.
pub fn state_summary<T>(state: &OperationState<T>) -> String {
    match state.failure() {
        Some(failure) => format!("{}: {failure}", state.label()),
        None => state.label().to_string(),
    }
}

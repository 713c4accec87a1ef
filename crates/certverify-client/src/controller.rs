//! # Certificate Client Controller
//!
//! Session state for an interactive front end: the configured base URL and
//! bearer token, the lookup input, the registration form, and one
//! [`OperationState`] per operation.
//!
//! ## Overlapping Submissions
//!
//! The controller is `Send + Sync` and can be shared behind an `Arc`. A
//! submission of a kind that is already `Pending` is rejected with
//! [`CertApiError::Busy`]: no request is sent and the in-flight operation's
//! state is left untouched. Lookup and registration are tracked independently.
//!
//! The session lock is never held across an `.await`; state changes only when
//! a submission starts (`Pending`) and when it settles. A submission future
//! dropped mid-flight (timeout, `select!`, aborted task) settles its operation
//! as cancelled, so the next submission is accepted.

use parking_lot::Mutex;
use zeroize::Zeroizing;

use certverify_core::{CertificateForm, FormField, OperationState};

use crate::certificates::{CertificateClient, VerifiedCertificate};
use crate::config::{normalize_token, ApiBase, ClientConfig, ConfigError};
use crate::error::CertApiError;

#[derive(Debug, Clone, Copy)]
enum Operation {
    Lookup,
    Registration,
}

/// Cancels the operation on drop unless disarmed after settling.
struct PendingGuard<'a> {
    session: &'a Mutex<Session>,
    operation: Operation,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(session: &'a Mutex<Session>, operation: Operation) -> Self {
        Self {
            session,
            operation,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::debug!(operation = ?self.operation, "submission dropped before completion");
        let mut session = self.session.lock();
        match self.operation {
            Operation::Lookup => session.lookup.cancel(),
            Operation::Registration => session.registration.cancel(),
        }
    }
}

struct Session {
    api_base: ApiBase,
    token: Option<Zeroizing<String>>,
    lookup_input: String,
    form: CertificateForm,
    lookup: OperationState<VerifiedCertificate>,
    registration: OperationState<String>,
}

/// Mediates lookup and registration against the configured service.
pub struct CertificateController {
    http: reqwest::Client,
    session: Mutex<Session>,
}

impl std::fmt::Debug for CertificateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session.lock();
        f.debug_struct("CertificateController")
            .field("api_base", &session.api_base)
            .field("token", &session.token.as_ref().map(|_| "[REDACTED]"))
            .field("lookup", &session.lookup.label())
            .field("registration", &session.registration.label())
            .finish()
    }
}

impl CertificateController {
    /// Create a controller with an empty session.
    pub fn new(config: &ClientConfig) -> Result<Self, CertApiError> {
        let http = crate::build_http(config.timeout_secs)?;
        Ok(Self {
            http,
            session: Mutex::new(Session {
                api_base: config.api_base.clone(),
                token: config.api_token.clone(),
                lookup_input: String::new(),
                form: CertificateForm::default(),
                lookup: OperationState::Idle,
                registration: OperationState::Idle,
            }),
        })
    }

    // -- Configuration --------------------------------------------------------

    pub fn api_base(&self) -> ApiBase {
        self.session.lock().api_base.clone()
    }

    /// Replace the base URL. Invalid input keeps the current base.
    ///
    /// Applies to submissions started after this call.
    pub fn set_api_base(&self, raw: &str) -> Result<ApiBase, ConfigError> {
        let base = ApiBase::parse(raw)?;
        tracing::info!(api_base = %base, "API base updated");
        self.session.lock().api_base = base.clone();
        Ok(base)
    }

    /// Set or clear the bearer token. Blank input clears it.
    pub fn set_token(&self, token: Option<String>) {
        let token = normalize_token(token);
        tracing::debug!(configured = token.is_some(), "bearer token updated");
        self.session.lock().token = token;
    }

    pub fn has_token(&self) -> bool {
        self.session.lock().token.is_some()
    }

    // -- Input ----------------------------------------------------------------

    pub fn set_lookup_input(&self, id: impl Into<String>) {
        self.session.lock().lookup_input = id.into();
    }

    pub fn lookup_input(&self) -> String {
        self.session.lock().lookup_input.clone()
    }

    pub fn set_form_field(&self, field: FormField, value: impl Into<String>) {
        self.session.lock().form.set(field, value);
    }

    pub fn set_form(&self, form: CertificateForm) {
        self.session.lock().form = form;
    }

    /// Snapshot of the registration form.
    pub fn form(&self) -> CertificateForm {
        self.session.lock().form.clone()
    }

    // -- State ----------------------------------------------------------------

    pub fn lookup_state(&self) -> OperationState<VerifiedCertificate> {
        self.session.lock().lookup.clone()
    }

    pub fn registration_state(&self) -> OperationState<String> {
        self.session.lock().registration.clone()
    }

    // -- Operations -----------------------------------------------------------

    /// Set the lookup input and submit it.
    pub async fn lookup(&self, id: &str) -> Result<VerifiedCertificate, CertApiError> {
        self.set_lookup_input(id);
        self.submit_lookup().await
    }

    /// Look up the current lookup input.
    ///
    /// The lookup state moves to `Pending` and then settles with the result.
    /// Validation failures settle as `Failed` without a request.
    pub async fn submit_lookup(&self) -> Result<VerifiedCertificate, CertApiError> {
        let (client, input) = {
            let mut session = self.session.lock();
            if !session.lookup.begin() {
                return Err(CertApiError::Busy { operation: "lookup" });
            }
            (self.client_for(&session), session.lookup_input.clone())
        };
        let guard = PendingGuard::new(&self.session, Operation::Lookup);

        let result = client.lookup(&input).await;

        self.session
            .lock()
            .lookup
            .settle(result.as_ref().cloned().map_err(CertApiError::to_failure));
        guard.disarm();
        result
    }

    /// Register the current form with the current token.
    ///
    /// On success the form is cleared; on any failure it is left as is.
    pub async fn submit_registration(&self) -> Result<String, CertApiError> {
        let (client, form, token) = {
            let mut session = self.session.lock();
            if !session.registration.begin() {
                return Err(CertApiError::Busy {
                    operation: "registration",
                });
            }
            (
                self.client_for(&session),
                session.form.clone(),
                session.token.clone(),
            )
        };
        let guard = PendingGuard::new(&self.session, Operation::Registration);

        let result = client
            .register(&form, token.as_ref().map(|t| t.as_str()))
            .await;

        let mut session = self.session.lock();
        session
            .registration
            .settle(result.as_ref().cloned().map_err(CertApiError::to_failure));
        if result.is_ok() {
            session.form.clear();
        }
        drop(session);
        guard.disarm();
        result
    }

    fn client_for(&self, session: &Session) -> CertificateClient {
        CertificateClient::with_http(self.http.clone(), session.api_base.clone())
    }
}

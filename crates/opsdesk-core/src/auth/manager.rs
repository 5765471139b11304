//! Session manager: the single owner of the current session.
//!
//! State lives in a `watch` channel. `SessionManager` (and the revocation
//! hook handed to the HTTP client) are the only writers; everything else
//! holds a `SessionHandle` and reads snapshots.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::api::ApiError;
use crate::models::AuthResponse;
use crate::router::Navigator;

use super::{AuthError, Session, TokenStore};

/// The authentication exchanges the session manager drives.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<AuthResponse, ApiError>;
    /// Exchange the stored token for a fresh one.
    async fn refresh(&self) -> Result<AuthResponse, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Loading,
    Authenticated,
    Unauthenticated,
    Error,
}

/// What readers see. `session` is present iff `status` is `Authenticated`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session: Option<Session>,
    pub error: Option<AuthError>,
    /// Set until the first session operation finishes.
    pub initial_load_pending: bool,
}

impl SessionSnapshot {
    fn uninitialized() -> Self {
        Self {
            status: SessionStatus::Uninitialized,
            session: None,
            error: None,
            initial_load_pending: true,
        }
    }

    /// Guarded content must wait while this is true.
    pub fn is_loading(&self) -> bool {
        self.initial_load_pending
            || matches!(self.status, SessionStatus::Loading | SessionStatus::Uninitialized)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

/// Read-only view of the session, passed down to whatever needs it.
#[derive(Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub fn snapshot(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    pub fn borrow(&self) -> watch::Ref<'_, SessionSnapshot> {
        self.rx.borrow()
    }

    /// True if the session changed since this handle last looked.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Mark the current snapshot as seen and return it.
    pub fn mark_seen(&mut self) -> SessionSnapshot {
        self.rx.borrow_and_update().clone()
    }
}

/// Hook the HTTP client calls when the backend answers 401.
pub trait SessionRevoker: Send + Sync {
    fn revoke(&self);
}

/// Shared session state cell. Create one per client context and hand a
/// clone to both the `ApiClient` (as its revoker) and the `SessionManager`.
#[derive(Clone)]
pub struct SessionCell {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::uninitialized());
        Self { tx: Arc::new(tx) }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle { rx: self.tx.subscribe() }
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    fn publish(&self, snapshot: SessionSnapshot) {
        self.tx.send_replace(snapshot);
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRevoker for SessionCell {
    fn revoke(&self) {
        self.tx.send_modify(|state| {
            let had_session = state.session.take().is_some();
            state.status = SessionStatus::Unauthenticated;
            state.initial_load_pending = false;
            if had_session {
                state.error = Some(AuthError::Expired);
            }
        });
    }
}

pub struct SessionManager<A: AuthApi> {
    api: A,
    tokens: Arc<dyn TokenStore>,
    navigator: Navigator,
    cell: SessionCell,
}

impl<A: AuthApi> SessionManager<A> {
    pub fn new(api: A, tokens: Arc<dyn TokenStore>, navigator: Navigator, cell: SessionCell) -> Self {
        Self {
            api,
            tokens,
            navigator,
            cell,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.cell.handle()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.cell.snapshot()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.cell.snapshot().session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn set_loading(&self) {
        let pending = self.cell.snapshot().initial_load_pending;
        self.cell.publish(SessionSnapshot {
            status: SessionStatus::Loading,
            session: None,
            error: None,
            initial_load_pending: pending,
        });
    }

    fn set_authenticated(&self, session: Session) {
        self.cell.publish(SessionSnapshot {
            status: SessionStatus::Authenticated,
            session: Some(session),
            error: None,
            initial_load_pending: false,
        });
    }

    fn set_unauthenticated(&self, error: Option<AuthError>) {
        self.cell.publish(SessionSnapshot {
            status: SessionStatus::Unauthenticated,
            session: None,
            error,
            initial_load_pending: false,
        });
    }

    fn fail(&self, err: AuthError) -> AuthError {
        self.cell.publish(SessionSnapshot {
            status: SessionStatus::Error,
            session: None,
            error: Some(err.clone()),
            initial_load_pending: false,
        });
        err
    }

    fn stored_token(&self) -> Option<String> {
        match self.tokens.get() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Persist the token, then publish the session.
    fn establish(&self, session: Session) -> Result<Session, AuthError> {
        self.tokens
            .set(&session.token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.set_authenticated(session.clone());
        Ok(session)
    }

    /// Startup: trust a stored token only after the backend refreshes it.
    ///
    /// Never fails. Without a stored token no request is made.
    pub async fn initialize(&self) -> SessionStatus {
        self.set_loading();

        if self.stored_token().is_none() {
            info!("No stored credential, starting signed out");
            self.set_unauthenticated(None);
            return SessionStatus::Unauthenticated;
        }

        let result = match self.api.refresh().await {
            Ok(response) => Session::from_auth_response(response, None),
            Err(e) => Err(AuthError::from(e)),
        };

        match result.and_then(|session| self.establish(session)) {
            Ok(session) => {
                info!(user_id = %session.user_id, role = %session.role, "Session restored");
                SessionStatus::Authenticated
            }
            Err(err) => {
                warn!(error = ?err, "Stored credential rejected, starting signed out");
                if let Err(e) = self.tokens.clear() {
                    warn!(error = %e, "Failed to clear stored token");
                }
                self.set_unauthenticated(Some(err));
                SessionStatus::Unauthenticated
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(self.fail(AuthError::MissingCredentials));
        }

        self.set_loading();
        let result = match self.api.sign_in(email, password).await {
            Ok(response) => Session::from_auth_response(response, Some(email)),
            Err(e) => Err(AuthError::from(e)),
        };

        match result.and_then(|session| self.establish(session)) {
            Ok(session) => {
                info!(user_id = %session.user_id, role = %session.role, "Signed in");
                Ok(session)
            }
            Err(err) => {
                error!(error = ?err, "Sign-in failed");
                Err(self.fail(err))
            }
        }
    }

    /// Register and sign in. Only the token is persisted.
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        let name = name.trim();
        if email.is_empty() || password.is_empty() {
            return Err(self.fail(AuthError::MissingCredentials));
        }
        if name.is_empty() {
            return Err(self.fail(AuthError::MissingName));
        }

        self.set_loading();
        let result = match self.api.sign_up(email, password, name).await {
            Ok(response) => Session::from_auth_response(response, Some(email)),
            Err(e) => Err(AuthError::from(e)),
        };

        match result.and_then(|session| self.establish(session)) {
            Ok(session) => {
                info!(user_id = %session.user_id, role = %session.role, "Signed up");
                Ok(session)
            }
            Err(err) => {
                error!(error = ?err, "Sign-up failed");
                Err(self.fail(err))
            }
        }
    }

    /// Drop the session and go to sign-in. Always succeeds; idempotent.
    pub fn sign_out(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        self.set_unauthenticated(None);
        self.navigator.redirect_to_login();
        info!("Signed out");
    }

    /// Re-run the refresh exchange.
    ///
    /// On failure the session is dropped and the error returned, but no
    /// redirect is issued here; the caller decides. A 401 is still handled
    /// globally by the HTTP client.
    pub async fn refresh(&self) -> Result<Session, AuthError> {
        if self.stored_token().is_none() {
            return Err(self.fail(AuthError::NoStoredCredential));
        }

        let fallback_email = self.current_session().map(|s| s.email);
        self.set_loading();
        let result = match self.api.refresh().await {
            Ok(response) => Session::from_auth_response(response, fallback_email.as_deref()),
            Err(e) => Err(AuthError::from(e)),
        };

        match result.and_then(|session| self.establish(session)) {
            Ok(session) => {
                info!(user_id = %session.user_id, "Session refreshed");
                Ok(session)
            }
            Err(err) => {
                warn!(error = ?err, "Session refresh failed");
                Err(self.fail(err))
            }
        }
    }
}

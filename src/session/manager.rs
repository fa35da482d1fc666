//! Session manager: the single source of truth for the current user
//! and for obtaining and renewing credentials.
//!
//! CONCURRENCY
//! ===========
//! The environment is single-threaded and cooperative, so no locks are
//! used, but `refresh()` must be single-flight: the coordination slot is
//! claimed synchronously before the first await, so two logical refresh
//! calls can never both observe "not in flight". Callers arriving while
//! a refresh is outstanding park on a oneshot channel and share the one
//! outcome; waiters settle in enqueue order.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::json;

use crate::net::types::{AuthPayload, RefreshPayload, User};
use crate::session::error::ApiError;
use crate::session::storage::{
    ACCESS_TOKEN_KEY, CART_SNAPSHOT_KEY, REFRESH_TOKEN_KEY, TokenStorage,
};
use crate::session::token;
use crate::session::transport::{ApiRequest, HttpTransport};

/// Externally observable session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Anonymous,
    Authenticated,
}

type Hook = Box<dyn Fn()>;
type RefreshWaiter = oneshot::Sender<Result<String, ApiError>>;

pub struct SessionManager {
    transport: Rc<dyn HttpTransport>,
    storage: Rc<dyn TokenStorage>,
    current_user: RefCell<Option<User>>,
    phase: Cell<SessionPhase>,
    /// `Some` while a refresh HTTP call is outstanding; the vec holds
    /// the callers queued behind it, in arrival order.
    refresh_waiters: RefCell<Option<Vec<RefreshWaiter>>>,
    on_session_expired: RefCell<Option<Hook>>,
    on_identity_change: RefCell<Option<Hook>>,
}

impl SessionManager {
    pub fn new(transport: Rc<dyn HttpTransport>, storage: Rc<dyn TokenStorage>) -> Rc<Self> {
        Rc::new(Self {
            transport,
            storage,
            current_user: RefCell::new(None),
            phase: Cell::new(SessionPhase::Uninitialized),
            refresh_waiters: RefCell::new(None),
            on_session_expired: RefCell::new(None),
            on_identity_change: RefCell::new(None),
        })
    }

    /// Hook invoked on terminal session loss; the app reacts by
    /// navigating to the login surface.
    pub fn set_session_expired_hook(&self, hook: impl Fn() + 'static) {
        *self.on_session_expired.borrow_mut() = Some(Box::new(hook));
    }

    /// Hook invoked synchronously whenever the authenticated identity
    /// changes; the app reacts by discarding cached cart state.
    pub fn set_identity_change_hook(&self, hook: impl Fn() + 'static) {
        *self.on_identity_change.borrow_mut() = Some(Box::new(hook));
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.get()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.borrow().is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn has_refresh_token(&self) -> bool {
        self.storage.get(REFRESH_TOKEN_KEY).is_some()
    }

    pub(crate) fn emit_session_expired(&self) {
        if let Some(hook) = self.on_session_expired.borrow().as_ref() {
            hook();
        }
    }

    /// Restore the session from persisted tokens. Runs once at startup
    /// and settles (authenticated or anonymous) before dependent UI is
    /// allowed to render.
    ///
    /// A stored token with an `exp` in the future is adopted with no
    /// network call; an expired one with a refresh token present costs
    /// exactly one refresh attempt; anything else clears storage.
    pub async fn initialize(&self) -> SessionPhase {
        if self.phase.get() != SessionPhase::Uninitialized {
            return self.phase.get();
        }
        self.phase.set(SessionPhase::Initializing);

        let Some(access) = self.storage.get(ACCESS_TOKEN_KEY) else {
            self.phase.set(SessionPhase::Anonymous);
            return SessionPhase::Anonymous;
        };

        match token::decode_claims(&access) {
            Ok(claims) if !claims.is_expired(token::now_epoch_secs()) => {
                *self.current_user.borrow_mut() = Some(User::from_claims(&claims));
                self.phase.set(SessionPhase::Authenticated);
            }
            Ok(_) if self.has_refresh_token() => {
                // Expired but refreshable; refresh() settles the phase
                // either way and clears storage on failure.
                let _ = self.refresh().await;
            }
            Ok(_) | Err(_) => {
                // Expired without recourse, or malformed: same outcome.
                self.clear_session();
            }
        }

        self.phase.get()
    }

    /// Authenticate against the login endpoint and adopt the returned
    /// credential pair.
    ///
    /// # Errors
    ///
    /// [`ApiError::Authentication`] with the server-provided message on
    /// rejected credentials; [`ApiError::Network`] when no response was
    /// received.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let request = ApiRequest::post("/auth/login")
            .with_json(json!({ "username": username, "password": password }));
        self.authenticate(request, "Login failed").await
    }

    /// Symmetric to [`Self::login`], targeting the registration endpoint.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let request = ApiRequest::post("/auth/register").with_json(json!({
            "username": username,
            "email": email,
            "password": password,
        }));
        self.authenticate(request, "Registration failed").await
    }

    async fn authenticate(&self, request: ApiRequest, fallback: &str) -> Result<User, ApiError> {
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            let message = response.error_message().unwrap_or_else(|| fallback.to_owned());
            return Err(ApiError::Authentication(message));
        }

        let payload: AuthPayload = response
            .json()
            .map_err(|_| ApiError::Authentication(fallback.to_owned()))?;

        self.storage.set(ACCESS_TOKEN_KEY, &payload.access_token);
        self.storage.set(REFRESH_TOKEN_KEY, &payload.refresh_token);

        // The server record is authoritative for display; the decoded
        // token stays authoritative for expiry checks only.
        self.adopt_identity(Some(payload.user.clone()));
        Ok(payload.user)
    }

    /// Drop the session locally: clears both tokens, the cached cart
    /// artifact, and the current user. Never touches the network.
    pub fn logout(&self) {
        self.clear_session();
    }

    /// Mint a new access token using the refresh token.
    ///
    /// At most one refresh HTTP call is outstanding at any time; every
    /// concurrent caller shares that call's outcome. On failure of any
    /// kind the session is cleared, the session-expired hook fires once,
    /// and all queued callers are rejected with the same error.
    ///
    /// # Errors
    ///
    /// [`ApiError::RefreshFailure`] on any failed or malformed refresh.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        // Claim or join the in-flight slot synchronously, before any
        // suspension point.
        let waiter = {
            let mut slot = self.refresh_waiters.borrow_mut();
            match slot.as_mut() {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    *slot = Some(Vec::new());
                    None
                }
            }
        };

        if let Some(rx) = waiter {
            return rx.await.unwrap_or_else(|_| {
                Err(ApiError::RefreshFailure("refresh was abandoned".to_owned()))
            });
        }

        let outcome = self.perform_refresh().await;

        if let Err(e) = &outcome {
            log::warn!("token refresh failed: {e}");
            self.clear_session();
            self.emit_session_expired();
        }

        // Settle: clear the in-flight flag, then drain waiters in FIFO
        // order so queued callers resolve in the order they arrived.
        let waiters = self.refresh_waiters.borrow_mut().take().unwrap_or_default();
        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }

        outcome
    }

    async fn perform_refresh(&self) -> Result<String, ApiError> {
        let Some(refresh_token) = self.storage.get(REFRESH_TOKEN_KEY) else {
            return Err(ApiError::RefreshFailure("no refresh token".to_owned()));
        };

        // The refresh endpoint is authenticated with the refresh token,
        // never the access token.
        let mut request = ApiRequest::post("/auth/refresh");
        request.bearer = Some(refresh_token);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| ApiError::RefreshFailure(e.to_string()))?;

        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            return Err(ApiError::RefreshFailure(message));
        }

        let payload: RefreshPayload = response
            .json()
            .map_err(|_| ApiError::RefreshFailure("malformed refresh response".to_owned()))?;

        self.storage.set(ACCESS_TOKEN_KEY, &payload.access_token);
        if let Some(rotated) = &payload.refresh_token {
            // Rotation is optional server behavior; keep the old refresh
            // token when no replacement is supplied.
            self.storage.set(REFRESH_TOKEN_KEY, rotated);
        }

        // Silent access-token replacement: identity is unchanged, but a
        // session restored from an expired token has no user yet.
        if self.current_user.borrow().is_none() {
            if let Ok(claims) = token::decode_claims(&payload.access_token) {
                *self.current_user.borrow_mut() = Some(User::from_claims(&claims));
            }
        }
        self.phase.set(SessionPhase::Authenticated);

        Ok(payload.access_token)
    }

    /// Adopt a new identity, discarding any cart artifact tied to the
    /// previous one before control returns to the caller.
    fn adopt_identity(&self, user: Option<User>) {
        self.storage.remove(CART_SNAPSHOT_KEY);
        self.phase.set(if user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        });
        *self.current_user.borrow_mut() = user;
        if let Some(hook) = self.on_identity_change.borrow().as_ref() {
            hook();
        }
    }

    fn clear_session(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.adopt_identity(None);
    }
}

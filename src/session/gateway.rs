//! Authenticated request gateway.
//!
//! Every outbound API call goes through [`Gateway::send`], which reads
//! the current access token from storage on each call (so clearing
//! storage is what "clears the default authorization header") and
//! recovers transparently from exactly one class of failure: an expired
//! access token answered with 401.
//!
//! The pipeline is `prepare -> send -> classify -> recover-or-surface`.
//! A 401 on a protected call triggers the session manager's
//! single-flight refresh; requests arriving while that refresh is
//! outstanding queue behind it and replay once, in order, when it
//! settles. A request that has already been replayed once is never
//! retried again.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use crate::session::error::ApiError;
use crate::session::manager::SessionManager;
use crate::session::transport::{ApiRequest, ApiResponse, HttpTransport};

/// Paths that establish authentication and are therefore exempt from
/// the "must already be authenticated" rule and from 401 replay.
fn is_auth_endpoint(path: &str) -> bool {
    matches!(path, "/auth/login" | "/auth/register" | "/auth/refresh")
}

pub struct Gateway {
    transport: Rc<dyn HttpTransport>,
    session: Rc<SessionManager>,
}

impl Gateway {
    pub fn new(transport: Rc<dyn HttpTransport>, session: Rc<SessionManager>) -> Rc<Self> {
        Rc::new(Self { transport, session })
    }

    pub fn session(&self) -> &Rc<SessionManager> {
        &self.session
    }

    /// Send an API request with the current credentials attached.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotAuthenticated`] for a protected call with no
    ///   access token; the session-expired signal fires and no network
    ///   call is made.
    /// - [`ApiError::Network`] when no response was received; session
    ///   state is untouched and no refresh is attempted.
    /// - [`ApiError::RefreshFailure`] when a 401 triggered a refresh
    ///   that itself failed; the session has been cleared.
    /// - [`ApiError::Unauthorized`] when a replayed request was rejected
    ///   with 401 a second time.
    /// - [`ApiError::Status`] for any other non-2xx response.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let auth_exempt = is_auth_endpoint(&request.path);
        let access = self.session.access_token();

        if !auth_exempt && access.is_none() {
            self.session.emit_session_expired();
            return Err(ApiError::NotAuthenticated);
        }
        if request.bearer.is_none() {
            request.bearer = access;
        }

        let replay = request.clone();
        let response = self.transport.execute(request).await?;

        if response.status != 401 || auth_exempt || !self.session.has_refresh_token() {
            return Self::classify(response);
        }

        // Expired-token recovery: share the single-flight refresh, then
        // replay the original request exactly once with the new token.
        let fresh_token = self.session.refresh().await?;
        let mut retry = replay;
        retry.bearer = Some(fresh_token);

        let second = self.transport.execute(retry).await?;
        if second.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        Self::classify(second)
    }

    fn classify(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        if response.status >= 500 {
            log::warn!("server error {} on API call", response.status);
        }
        let message = response
            .error_message()
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        Err(ApiError::Status { status: response.status, message })
    }
}

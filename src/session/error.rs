//! Error taxonomy for session and API failures.
//!
//! Errors are `Clone` because a single failed refresh settles every
//! request queued behind it with the same error value.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Login or registration rejected by the server. The message is the
    /// server-provided one when present, user-correctable and shown inline.
    #[error("{0}")]
    Authentication(String),

    /// A protected call was attempted with no access token at all.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The refresh endpoint rejected the refresh token or returned a
    /// malformed body. Terminal for the session.
    #[error("session refresh failed: {0}")]
    RefreshFailure(String),

    /// A request still returned 401 after one refresh-and-replay cycle.
    #[error("request unauthorized after token refresh")]
    Unauthorized,

    /// Transport-level failure, no HTTP response received. Session state
    /// is left untouched.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-2xx response, passed through to the caller.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A response body (or token payload) that could not be parsed.
    #[error("malformed payload: {0}")]
    Decode(String),
}

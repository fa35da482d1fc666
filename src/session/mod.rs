//! Client-side session and authenticated request handling.
//!
//! DESIGN
//! ======
//! The session layer is split into small pieces so the token lifecycle
//! can be driven entirely by tests without a browser or a network:
//!
//! - [`token`] — pure JWT payload decoding and expiry checks.
//! - [`storage`] — the persisted `access_token` / `refresh_token`
//!   entries behind the [`storage::TokenStorage`] trait.
//! - [`transport`] — the HTTP seam behind [`transport::HttpTransport`].
//! - [`manager`] — the [`manager::SessionManager`] state machine:
//!   initialize, login, register, logout, and single-flight refresh.
//! - [`gateway`] — the [`gateway::Gateway`] that attaches bearer tokens
//!   and recovers from expired-token 401s with refresh-and-replay.

pub mod error;
pub mod gateway;
pub mod manager;
pub mod storage;
pub mod token;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use error::ApiError;
pub use gateway::Gateway;
pub use manager::{SessionManager, SessionPhase};
pub use storage::{MemoryStorage, TokenStorage};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody};

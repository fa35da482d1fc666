//! Typed API surface over the session gateway.

pub mod api;
pub mod types;

//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `cart`, `chat`, etc.) so individual
//! components can depend on small focused models. Each struct is a plain
//! value held in an `RwSignal` provided via context by the root `App`.

pub mod auth;
pub mod cart;
pub mod chat;
pub mod orders;
pub mod products;
pub mod ui;

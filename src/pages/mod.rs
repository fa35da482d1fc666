//! Page components, one per route.

pub mod cart;
pub mod chat;
pub mod home;
pub mod login;
pub mod orders;
pub mod product_detail;
pub mod products;
pub mod register;

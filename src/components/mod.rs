//! Reusable UI components shared across pages.

pub mod checkout_form;
pub mod navbar;
pub mod notices;
pub mod product_card;

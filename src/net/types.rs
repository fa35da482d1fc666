//! Wire types for the storefront API.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::session::token::Claims;

/// Server-side user record, authoritative for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Minimal identity derived from decoded token claims, used when a
    /// session is restored from storage and no server record is at hand.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username.clone().unwrap_or_default(),
            email: claims.email.clone().unwrap_or_default(),
            created_at: None,
        }
    }
}

/// Body of a successful login or registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Body of a successful refresh response. The refresh token is only
/// rotated when the server supplies a replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshPayload {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock_quantity: i64,
}

/// One page of catalog results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub pages: i64,
    #[serde(default)]
    pub current_page: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub quantity: i64,
    pub product: Product,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.product.price * i.quantity as f64)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub quantity: i64,
    pub price: f64,
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Checkout form payload for creating an order from the cart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewOrder {
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    pub payment_method: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// Reply from the recommendation assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub session_id: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub conversation_type: Option<String>,
}

/// Catalog query parameters; serialized into the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub style: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ProductFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(v) = value {
                if !v.is_empty() {
                    query.push((key.to_owned(), v));
                }
            }
        };
        push("category", self.category.clone());
        push("subcategory", self.subcategory.clone());
        push("style", self.style.clone());
        push("color", self.color.clone());
        push("min_price", self.min_price.map(|p| p.to_string()));
        push("max_price", self.max_price.map(|p| p.to_string()));
        push("search", self.search.clone());
        push("page", self.page.map(|p| p.to_string()));
        push("per_page", self.per_page.map(|p| p.to_string()));
        query
    }
}

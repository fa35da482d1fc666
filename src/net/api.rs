//! Endpoint helpers for the storefront API.
//!
//! Each helper sends through the [`Gateway`], so bearer attachment and
//! expired-token recovery are uniform across endpoints. Responses are
//! unwrapped from the server's envelope shapes here so pages only see
//! domain types.

use serde::Deserialize;
use serde_json::json;

use crate::net::types::{Cart, ChatReply, NewOrder, Order, Product, ProductFilter, ProductPage, User};
use crate::session::error::ApiError;
use crate::session::gateway::Gateway;
use crate::session::transport::ApiRequest;

#[derive(Deserialize)]
struct CartEnvelope {
    cart: Cart,
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct OrderEnvelope {
    order: Order,
}

/// Fetch one page of the catalog with the given filters.
pub async fn fetch_products(
    gateway: &Gateway,
    filter: &ProductFilter,
) -> Result<ProductPage, ApiError> {
    gateway
        .send(ApiRequest::get("/products").with_query(filter.to_query()))
        .await?
        .json()
}

pub async fn fetch_product(gateway: &Gateway, product_id: i64) -> Result<Product, ApiError> {
    gateway
        .send(ApiRequest::get(format!("/products/{product_id}")))
        .await?
        .json()
}

pub async fn fetch_cart(gateway: &Gateway) -> Result<Cart, ApiError> {
    let envelope: CartEnvelope = gateway.send(ApiRequest::get("/cart")).await?.json()?;
    Ok(envelope.cart)
}

pub async fn add_to_cart(
    gateway: &Gateway,
    product_id: i64,
    quantity: i64,
) -> Result<Cart, ApiError> {
    let request = ApiRequest::post("/cart/items")
        .with_json(json!({ "product_id": product_id, "quantity": quantity }));
    let envelope: CartEnvelope = gateway.send(request).await?.json()?;
    Ok(envelope.cart)
}

pub async fn update_cart_item(
    gateway: &Gateway,
    item_id: i64,
    quantity: i64,
) -> Result<Cart, ApiError> {
    let request =
        ApiRequest::put(format!("/cart/items/{item_id}")).with_json(json!({ "quantity": quantity }));
    let envelope: CartEnvelope = gateway.send(request).await?.json()?;
    Ok(envelope.cart)
}

pub async fn remove_cart_item(gateway: &Gateway, item_id: i64) -> Result<Cart, ApiError> {
    let envelope: CartEnvelope = gateway
        .send(ApiRequest::delete(format!("/cart/items/{item_id}")))
        .await?
        .json()?;
    Ok(envelope.cart)
}

pub async fn clear_cart(gateway: &Gateway) -> Result<(), ApiError> {
    gateway.send(ApiRequest::delete("/cart")).await?;
    Ok(())
}

pub async fn fetch_orders(gateway: &Gateway) -> Result<Vec<Order>, ApiError> {
    let envelope: OrdersEnvelope = gateway.send(ApiRequest::get("/orders")).await?.json()?;
    Ok(envelope.orders)
}

pub async fn fetch_order(gateway: &Gateway, order_id: i64) -> Result<Order, ApiError> {
    let envelope: OrderEnvelope = gateway
        .send(ApiRequest::get(format!("/orders/{order_id}")))
        .await?
        .json()?;
    Ok(envelope.order)
}

/// Create an order from the current cart; the server clears the cart.
pub async fn create_order(gateway: &Gateway, order: &NewOrder) -> Result<Order, ApiError> {
    let body = serde_json::to_value(order).map_err(|e| ApiError::Decode(e.to_string()))?;
    let envelope: OrderEnvelope = gateway
        .send(ApiRequest::post("/orders").with_json(body))
        .await?
        .json()?;
    Ok(envelope.order)
}

pub async fn cancel_order(gateway: &Gateway, order_id: i64) -> Result<(), ApiError> {
    gateway
        .send(ApiRequest::delete(format!("/orders/{order_id}")))
        .await?;
    Ok(())
}

/// Send a message to the recommendation assistant.
pub async fn send_chat_message(
    gateway: &Gateway,
    message: &str,
    session_id: Option<&str>,
) -> Result<ChatReply, ApiError> {
    let mut body = json!({ "message": message });
    if let Some(id) = session_id {
        body["session_id"] = json!(id);
    }
    gateway
        .send(ApiRequest::post("/chat/message").with_json(body))
        .await?
        .json()
}

/// Fetch the authenticated user's server record.
pub async fn fetch_current_user(gateway: &Gateway) -> Result<User, ApiError> {
    gateway.send(ApiRequest::get("/auth/me")).await?.json()
}

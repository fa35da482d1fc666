use super::*;
use serde_json::json;

#[test]
fn product_page_tolerates_missing_pagination_fields() {
    let page: ProductPage = serde_json::from_value(json!({
        "products": [{"id": 1, "name": "Laptop", "price": 999.0}]
    }))
    .unwrap();

    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].name, "Laptop");
    assert_eq!(page.total, 0);
    assert_eq!(page.current_page, 0);
}

#[test]
fn cart_totals_weigh_quantity() {
    let cart: Cart = serde_json::from_value(json!({
        "id": 7,
        "items": [
            {"id": 1, "quantity": 3, "product": {"id": 10, "name": "Mouse", "price": 25.0}},
            {"id": 2, "quantity": 1, "product": {"id": 11, "name": "Keyboard", "price": 80.0}}
        ]
    }))
    .unwrap();

    assert_eq!(cart.item_count(), 4);
    assert!((cart.total() - 155.0).abs() < 1e-9);
}

#[test]
fn chat_reply_defaults_empty_attachments() {
    let reply: ChatReply = serde_json::from_value(json!({
        "message": "Here you go",
        "session_id": "abc"
    }))
    .unwrap();

    assert!(reply.products.is_empty());
    assert!(reply.suggestions.is_empty());
    assert!(reply.conversation_type.is_none());
}

#[test]
fn user_from_claims_fills_missing_fields_with_defaults() {
    let claims: crate::session::token::Claims = serde_json::from_value(json!({
        "sub": 42,
        "exp": 1_900_000_000u64
    }))
    .unwrap();

    let user = User::from_claims(&claims);
    assert_eq!(user.id, 42);
    assert!(user.username.is_empty());
    assert!(user.created_at.is_none());
}

#[test]
fn filter_query_skips_unset_and_empty_values() {
    let filter = ProductFilter {
        category: Some("Electronics".to_owned()),
        search: Some(String::new()),
        min_price: Some(10.0),
        page: Some(2),
        ..ProductFilter::default()
    };

    let query = filter.to_query();
    assert_eq!(
        query,
        vec![
            ("category".to_owned(), "Electronics".to_owned()),
            ("min_price".to_owned(), "10".to_owned()),
            ("page".to_owned(), "2".to_owned()),
        ]
    );
}

#[test]
fn new_order_omits_absent_billing_address() {
    let order = NewOrder {
        shipping_address: "1 Main St".to_owned(),
        billing_address: None,
        payment_method: "credit_card".to_owned(),
        customer_email: "a@b.c".to_owned(),
        customer_phone: "555-0100".to_owned(),
    };

    let value = serde_json::to_value(&order).unwrap();
    assert!(value.get("billing_address").is_none());
    assert_eq!(value["payment_method"], "credit_card");
}

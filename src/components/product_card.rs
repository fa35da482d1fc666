//! Catalog card for a single product.

use leptos::prelude::*;

use crate::net::types::Product;

/// A product tile with image, price, rating, and an add-to-cart action.
#[component]
pub fn ProductCard(product: Product, on_add: Callback<i64>) -> impl IntoView {
    let id = product.id;
    let href = format!("/products/{id}");
    let price = format!("${:.2}", product.price);
    let rating = format!("{:.1}", product.rating);
    let in_stock = product.stock_quantity > 0;

    view! {
        <div class="product-card">
            <a class="product-card__media" href=href.clone()>
                <img src=product.image_url alt=product.name.clone()/>
            </a>
            <div class="product-card__body">
                <a class="product-card__name" href=href>{product.name}</a>
                {product
                    .category
                    .map(|c| view! { <span class="product-card__category">{c}</span> })}
                <div class="product-card__meta">
                    <span class="product-card__price">{price}</span>
                    <span class="product-card__rating">{"★ "}{rating}</span>
                </div>
                <button
                    class="btn btn--primary"
                    disabled=!in_stock
                    on:click=move |_| on_add.run(id)
                >
                    {if in_stock { "Add to Cart" } else { "Out of Stock" }}
                </button>
            </div>
        </div>
    }
}

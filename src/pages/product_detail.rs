//! Detail page for a single product.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::types::Product;
use crate::state::auth::AuthState;
use crate::state::cart::CartState;
use crate::state::ui::UiState;

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    let params = use_params_map();

    let product = RwSignal::new(Option::<Product>::None);
    let loaded = RwSignal::new(false);
    let quantity = RwSignal::new(1i64);

    Effect::new(move || {
        let state = auth.get();
        if state.loading {
            return;
        }
        if state.user.is_none() {
            navigate("/login", NavigateOptions::default());
            return;
        }
        let Some(product_id) = params.get().get("id").and_then(|id| id.parse::<i64>().ok())
        else {
            return;
        };
        if !loaded.get_untracked() {
            loaded.set(true);
            leptos::task::spawn_local(async move {
                let svc = crate::app::services();
                match crate::net::api::fetch_product(&svc.gateway, product_id).await {
                    Ok(found) => product.set(Some(found)),
                    Err(err) => ui.update(|u| u.push_error(&err.to_string())),
                }
            });
        }
    });

    let on_add = move |_| {
        let Some(product_id) = product.get_untracked().map(|p| p.id) else {
            return;
        };
        let count = quantity.get_untracked().max(1);
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match crate::net::api::add_to_cart(&svc.gateway, product_id, count).await {
                Ok(fresh) => {
                    cart.update(|c| c.cart = fresh);
                    ui.update(|u| u.push_success("Added to cart."));
                }
                Err(err) => ui.update(|u| u.push_error(&err.to_string())),
            }
        });
    };

    view! {
        <div class="product-detail">
            {move || match product.get() {
                None => view! { <p>"Loading product..."</p> }.into_any(),
                Some(found) => {
                    let in_stock = found.stock_quantity > 0;
                    view! {
                        <div class="product-detail__layout">
                            <img
                                class="product-detail__image"
                                src=found.image_url
                                alt=found.name.clone()
                            />
                            <div class="product-detail__info">
                                <h1>{found.name}</h1>
                                {found
                                    .category
                                    .map(|c| view! { <span class="product-detail__category">{c}</span> })}
                                <p class="product-detail__price">
                                    {format!("${:.2}", found.price)}
                                </p>
                                <p class="product-detail__rating">
                                    {format!("★ {:.1}", found.rating)}
                                </p>
                                {found
                                    .description
                                    .map(|d| view! { <p class="product-detail__description">{d}</p> })}
                                <div class="product-detail__actions">
                                    <input
                                        class="product-detail__quantity"
                                        type="number"
                                        min="1"
                                        prop:value=move || quantity.get().to_string()
                                        on:input=move |ev| {
                                            if let Ok(q) = event_target_value(&ev).parse::<i64>() {
                                                quantity.set(q.max(1));
                                            }
                                        }
                                    />
                                    <button
                                        class="btn btn--primary"
                                        disabled=!in_stock
                                        on:click=on_add
                                    >
                                        {if in_stock { "Add to Cart" } else { "Out of Stock" }}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

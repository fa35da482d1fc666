//! Cart page with quantity controls and checkout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::checkout_form::CheckoutForm;
use crate::net::types::{CartItem, NewOrder};
use crate::state::auth::AuthState;
use crate::state::cart::CartState;
use crate::state::ui::UiState;

#[component]
pub fn CartPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    let loaded = RwSignal::new(false);

    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let state = auth.get();
            if state.loading {
                return;
            }
            if state.user.is_none() {
                navigate("/login", NavigateOptions::default());
                return;
            }
            if !loaded.get_untracked() {
                loaded.set(true);
                cart.update(|c| c.loading = true);
                leptos::task::spawn_local(async move {
                    let svc = crate::app::services();
                    match crate::net::api::fetch_cart(&svc.gateway).await {
                        Ok(fresh) => cart.update(|c| {
                            c.cart = fresh;
                            c.loading = false;
                        }),
                        Err(err) => {
                            cart.update(|c| c.loading = false);
                            ui.update(|u| u.push_error(&err.to_string()));
                        }
                    }
                });
            }
        });
    }

    let set_quantity = move |item_id: i64, quantity: i64| {
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            let result = if quantity < 1 {
                crate::net::api::remove_cart_item(&svc.gateway, item_id).await
            } else {
                crate::net::api::update_cart_item(&svc.gateway, item_id, quantity).await
            };
            match result {
                Ok(fresh) => cart.update(|c| c.cart = fresh),
                Err(err) => ui.update(|u| u.push_error(&err.to_string())),
            }
        });
    };

    let clear = move |_| {
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match crate::net::api::clear_cart(&svc.gateway).await {
                Ok(()) => cart.update(|c| c.cart = Default::default()),
                Err(err) => ui.update(|u| u.push_error(&err.to_string())),
            }
        });
    };

    let place_order = Callback::new(move |order: NewOrder| {
        cart.update(|c| c.checkout_pending = true);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match crate::net::api::create_order(&svc.gateway, &order).await {
                Ok(_) => {
                    cart.set(CartState::default());
                    ui.update(|u| u.push_success("Order placed successfully!"));
                    navigate("/orders", NavigateOptions::default());
                }
                Err(err) => {
                    cart.update(|c| c.checkout_pending = false);
                    ui.update(|u| u.push_error(&err.to_string()));
                }
            }
        });
    });

    let close_checkout = Callback::new(move |_: ()| {
        cart.update(|c| c.checkout_open = false);
    });

    view! {
        <div class="cart-page">
            <h1>"Your Cart"</h1>

            {move || {
                let state = cart.get();
                if state.loading {
                    view! { <p>"Loading cart..."</p> }.into_any()
                } else if state.is_empty() {
                    view! {
                        <p>"Your cart is empty. " <a href="/products">"Browse products"</a></p>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="cart-page__items">
                            {state
                                .cart
                                .items
                                .clone()
                                .into_iter()
                                .map(|item| view! { <CartRow item=item set_quantity=set_quantity/> })
                                .collect::<Vec<_>>()}
                        </div>
                        <div class="cart-page__summary">
                            <span class="cart-page__total">
                                {format!("Total: ${:.2}", state.total())}
                            </span>
                            <button class="btn" on:click=clear>
                                "Clear Cart"
                            </button>
                            <button
                                class="btn btn--primary"
                                on:click=move |_| cart.update(|c| c.checkout_open = true)
                            >
                                "Checkout"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}

            <Show when=move || cart.get().checkout_open>
                <CheckoutForm
                    on_submit=place_order
                    on_cancel=close_checkout
                    pending=Signal::derive(move || cart.get().checkout_pending)
                />
            </Show>
        </div>
    }
}

/// One line of the cart with quantity stepper and remove action.
#[component]
fn CartRow(item: CartItem, set_quantity: impl Fn(i64, i64) + Copy + 'static) -> impl IntoView {
    let item_id = item.id;
    let quantity = item.quantity;
    let line_total = format!("${:.2}", item.product.price * quantity as f64);

    view! {
        <div class="cart-row">
            <img class="cart-row__image" src=item.product.image_url alt=item.product.name.clone()/>
            <a class="cart-row__name" href=format!("/products/{}", item.product.id)>
                {item.product.name}
            </a>
            <div class="cart-row__stepper">
                <button class="btn" on:click=move |_| set_quantity(item_id, quantity - 1)>
                    "−"
                </button>
                <span>{quantity}</span>
                <button class="btn" on:click=move |_| set_quantity(item_id, quantity + 1)>
                    "+"
                </button>
            </div>
            <span class="cart-row__total">{line_total}</span>
            <button class="btn" on:click=move |_| set_quantity(item_id, 0)>
                "Remove"
            </button>
        </div>
    }
}

//! Order history page with cancellation for open orders.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::orders::OrdersState;
use crate::state::ui::UiState;

fn load(orders: RwSignal<OrdersState>, ui: RwSignal<UiState>) {
    orders.update(|o| o.loading = true);
    leptos::task::spawn_local(async move {
        let svc = crate::app::services();
        match crate::net::api::fetch_orders(&svc.gateway).await {
            Ok(list) => orders.update(|o| {
                o.orders = list;
                o.loading = false;
            }),
            Err(err) => {
                orders.update(|o| o.loading = false);
                ui.update(|u| u.push_error(&err.to_string()));
            }
        }
    });
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let orders = expect_context::<RwSignal<OrdersState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    let loaded = RwSignal::new(false);

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
            load(orders, ui);
        }
    });

    let cancel = move |order_id: i64| {
        orders.update(|o| o.cancel_pending = Some(order_id));
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match crate::net::api::cancel_order(&svc.gateway, order_id).await {
                Ok(()) => {
                    ui.update(|u| u.push_success("Order cancelled."));
                    orders.update(|o| o.cancel_pending = None);
                    load(orders, ui);
                }
                Err(err) => {
                    orders.update(|o| o.cancel_pending = None);
                    ui.update(|u| u.push_error(&err.to_string()));
                }
            }
        });
    };

    view! {
        <div class="orders-page">
            <h1>"Your Orders"</h1>

            {move || {
                let state = orders.get();
                if state.loading {
                    view! { <p>"Loading orders..."</p> }.into_any()
                } else if state.orders.is_empty() {
                    view! { <p>"No orders yet."</p> }.into_any()
                } else {
                    view! {
                        <div class="orders-page__list">
                            {state
                                .orders
                                .iter()
                                .map(|order| {
                                    let order_id = order.id;
                                    let cancellable = OrdersState::is_cancellable(order);
                                    let pending = state.cancel_pending == Some(order_id);
                                    let items = order
                                        .items
                                        .iter()
                                        .map(|i| {
                                            let name = i
                                                .product
                                                .as_ref()
                                                .map_or_else(|| format!("Item #{}", i.id), |p| p.name.clone());
                                            format!("{} × {}", i.quantity, name)
                                        })
                                        .collect::<Vec<_>>()
                                        .join(", ");
                                    view! {
                                        <div class="order-row">
                                            <div class="order-row__head">
                                                <span class="order-row__id">
                                                    {format!("Order #{order_id}")}
                                                </span>
                                                <span class="order-row__status">
                                                    {order.status.clone()}
                                                </span>
                                                <span class="order-row__total">
                                                    {format!("${:.2}", order.total_amount)}
                                                </span>
                                            </div>
                                            {order
                                                .created_at
                                                .clone()
                                                .map(|d| {
                                                    view! { <span class="order-row__date">{d}</span> }
                                                })}
                                            <p class="order-row__items">{items}</p>
                                            <Show when=move || cancellable>
                                                <button
                                                    class="btn"
                                                    disabled=pending
                                                    on:click=move |_| cancel(order_id)
                                                >
                                                    {if pending { "Cancelling..." } else { "Cancel Order" }}
                                                </button>
                                            </Show>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

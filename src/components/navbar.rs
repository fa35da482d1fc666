//! Top navigation bar with the cart badge and session controls.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::cart::CartState;

/// Site-wide navigation bar. Shows the live cart item count and either
/// the signed-in user's controls or login/register links.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        crate::app::services().session.logout();
        auth.update(|a| a.user = None);
        navigate("/login", NavigateOptions::default());
    };

    let cart_count = move || cart.get().item_count();

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"NexTechAI"</a>
            <div class="navbar__links">
                <a href="/products">"Products"</a>
                <a href="/chat">"Ask Alex"</a>
                <a href="/orders">"Orders"</a>
                <a class="navbar__cart" href="/cart">
                    "Cart"
                    <Show when={move || cart_count() > 0}>
                        <span class="navbar__cart-badge">{cart_count}</span>
                    </Show>
                </a>
            </div>
            <div class="navbar__session">
                {move || match auth.get().user {
                    Some(user) => {
                        let on_logout = on_logout.clone();
                        view! {
                            <span class="navbar__user">{format!("Hi, {}", user.username)}</span>
                            <button class="btn" on:click=on_logout>"Logout"</button>
                        }
                            .into_any()
                    }
                    None => view! {
                        <a class="btn" href="/login">"Login"</a>
                        <a class="btn btn--primary" href="/register">"Sign Up"</a>
                    }
                        .into_any(),
                }}
            </div>
        </nav>
    }
}

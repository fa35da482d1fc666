//! Landing page with the hero banner and a featured-product strip.

use leptos::prelude::*;

use crate::components::product_card::ProductCard;
use crate::net::types::{Product, ProductFilter};
use crate::state::auth::AuthState;
use crate::state::cart::CartState;
use crate::state::ui::UiState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let featured = RwSignal::new(Vec::<Product>::new());
    let loaded = RwSignal::new(false);

    // Featured products need a session; anonymous visitors just see the hero.
    Effect::new(move || {
        let state = auth.get();
        if state.loading || state.user.is_none() || loaded.get_untracked() {
            return;
        }
        loaded.set(true);
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            let filter = ProductFilter {
                per_page: Some(8),
                ..ProductFilter::default()
            };
            if let Ok(page) = crate::net::api::fetch_products(&svc.gateway, &filter).await {
                featured.set(page.products);
            }
        });
    });

    let on_add = Callback::new(move |product_id: i64| {
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match crate::net::api::add_to_cart(&svc.gateway, product_id, 1).await {
                Ok(fresh) => {
                    cart.update(|c| c.cart = fresh);
                    ui.update(|u| u.push_success("Added to cart."));
                }
                Err(err) => ui.update(|u| u.push_error(&err.to_string())),
            }
        });
    });

    view! {
        <div class="home-page">
            <section class="home-page__hero">
                <h1>"NexTechAI"</h1>
                <p>"Smart tech shopping, guided by Alex — your AI shopping assistant."</p>
                {move || {
                    if auth.get().user.is_some() {
                        view! {
                            <div class="home-page__cta">
                                <a class="btn btn--primary" href="/products">"Browse Products"</a>
                                <a class="btn" href="/chat">"Ask Alex"</a>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <div class="home-page__cta">
                                <a class="btn btn--primary" href="/login">"Sign In"</a>
                                <a class="btn" href="/register">"Create Account"</a>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </section>

            <Show when=move || !featured.get().is_empty()>
                <section class="home-page__featured">
                    <h2>"Featured Products"</h2>
                    <div class="home-page__grid">
                        {move || {
                            featured
                                .get()
                                .into_iter()
                                .map(|product| view! { <ProductCard product=product on_add=on_add/> })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </section>
            </Show>
        </div>
    }
}

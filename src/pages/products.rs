//! Catalog page with filters and pagination.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::product_card::ProductCard;
use crate::state::auth::AuthState;
use crate::state::cart::CartState;
use crate::state::products::ProductsState;
use crate::state::ui::UiState;

const CATEGORIES: &[&str] = &[
    "Smartphones",
    "Laptops",
    "Tablets",
    "Audio",
    "Gaming",
    "Wearables",
];

fn load(products: RwSignal<ProductsState>, ui: RwSignal<UiState>) {
    let filter = products.get_untracked().filter;
    products.update(|p| p.loading = true);
    leptos::task::spawn_local(async move {
        let svc = crate::app::services();
        match crate::net::api::fetch_products(&svc.gateway, &filter).await {
            Ok(page) => products.update(|p| {
                p.page = page;
                p.loading = false;
            }),
            Err(err) => {
                products.update(|p| p.loading = false);
                ui.update(|u| u.push_error(&err.to_string()));
            }
        }
    });
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let products = expect_context::<RwSignal<ProductsState>>();
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
            load(products, ui);
        }
    });

    let search = RwSignal::new(String::new());
    let min_price = RwSignal::new(String::new());
    let max_price = RwSignal::new(String::new());

    let apply = Callback::new(move |_: ()| {
        products.update(|p| {
            let s = search.get().trim().to_owned();
            p.filter.search = (!s.is_empty()).then_some(s);
            p.filter.min_price = min_price.get().trim().parse().ok();
            p.filter.max_price = max_price.get().trim().parse().ok();
            p.filter.page = Some(1);
        });
        load(products, ui);
    });

    let set_category = move |category: Option<String>| {
        products.update(|p| {
            p.filter.category = category;
            p.filter.page = Some(1);
        });
        load(products, ui);
    };

    let go_to_page = move |page: i64| {
        products.update(|p| p.filter.page = Some(page));
        load(products, ui);
    };

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
        <div class="products-page">
            <aside class="products-page__filters">
                <h3>"Categories"</h3>
                <button class="filter-chip" on:click=move |_| set_category(None)>
                    "All"
                </button>
                {CATEGORIES
                    .iter()
                    .map(|&category| {
                        view! {
                            <button
                                class="filter-chip"
                                on:click=move |_| set_category(Some(category.to_owned()))
                            >
                                {category}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}

                <h3>"Price"</h3>
                <input
                    class="products-page__input"
                    type="number"
                    placeholder="Min"
                    prop:value=move || min_price.get()
                    on:input=move |ev| min_price.set(event_target_value(&ev))
                />
                <input
                    class="products-page__input"
                    type="number"
                    placeholder="Max"
                    prop:value=move || max_price.get()
                    on:input=move |ev| max_price.set(event_target_value(&ev))
                />
                <button class="btn" on:click=move |_| apply.run(())>
                    "Apply"
                </button>
            </aside>

            <section class="products-page__results">
                <div class="products-page__search">
                    <input
                        type="search"
                        placeholder="Search products..."
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                apply.run(());
                            }
                        }
                    />
                </div>

                {move || {
                    let state = products.get();
                    if state.loading {
                        view! { <p>"Loading products..."</p> }.into_any()
                    } else if !state.has_results() {
                        view! { <p>"No products match your filters."</p> }.into_any()
                    } else {
                        view! {
                            <div class="products-page__grid">
                                {state
                                    .page
                                    .products
                                    .into_iter()
                                    .map(|product| {
                                        view! { <ProductCard product=product on_add=on_add/> }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                            .into_any()
                    }
                }}

                <div class="products-page__pager">
                    <button
                        class="btn"
                        disabled=move || !products.get().has_prev_page()
                        on:click=move |_| {
                            let page = products.get_untracked().page.current_page;
                            go_to_page(page - 1);
                        }
                    >
                        "Previous"
                    </button>
                    <span>
                        {move || {
                            let page = products.get().page;
                            format!("Page {} of {}", page.current_page.max(1), page.pages.max(1))
                        }}
                    </span>
                    <button
                        class="btn"
                        disabled=move || !products.get().has_next_page()
                        on:click=move |_| {
                            let page = products.get_untracked().page.current_page;
                            go_to_page(page + 1);
                        }
                    >
                        "Next"
                    </button>
                </div>
            </section>
        </div>
    }
}

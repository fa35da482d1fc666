//! Root application component with routing, context providers, and the
//! per-tab service singleton.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::notices::Notices;
use crate::pages::{
    cart::CartPage, chat::ChatPage, home::HomePage, login::LoginPage, orders::OrdersPage,
    product_detail::ProductDetailPage, products::ProductsPage, register::RegisterPage,
};
use crate::session::{Gateway, HttpTransport, SessionManager, TokenStorage};
use crate::state::{
    auth::AuthState, cart::CartState, chat::ChatState, orders::OrdersState,
    products::ProductsState, ui::UiState,
};

/// Long-lived client services shared by every page.
#[derive(Clone)]
pub struct Services {
    pub session: Rc<SessionManager>,
    pub gateway: Rc<Gateway>,
}

impl Services {
    fn bootstrap() -> Self {
        #[cfg(feature = "hydrate")]
        let (transport, storage): (Rc<dyn HttpTransport>, Rc<dyn TokenStorage>) = (
            Rc::new(crate::session::transport::FetchTransport::new(
                crate::session::transport::default_base_url(),
            )),
            Rc::new(crate::session::storage::BrowserStorage::new()),
        );
        #[cfg(not(feature = "hydrate"))]
        let (transport, storage): (Rc<dyn HttpTransport>, Rc<dyn TokenStorage>) = (
            Rc::new(crate::session::transport::InertTransport),
            Rc::new(crate::session::MemoryStorage::new()),
        );

        let session = SessionManager::new(Rc::clone(&transport), storage);
        let gateway = Gateway::new(transport, Rc::clone(&session));
        Self { session, gateway }
    }
}

thread_local! {
    static SERVICES: RefCell<Option<Services>> = const { RefCell::new(None) };
}

/// Per-tab service singleton, built lazily on first use. The browser
/// runtime is single threaded, so a thread local covers the whole tab.
pub fn services() -> Services {
    SERVICES.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(Services::bootstrap)
            .clone()
    })
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, wires the session hooks, and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Auth starts in the loading state so protected pages neither
    // redirect nor fetch until session bring-up settles.
    let auth = RwSignal::new(AuthState {
        user: None,
        loading: true,
    });
    let cart = RwSignal::new(CartState::default());
    let products = RwSignal::new(ProductsState::default());
    let orders = RwSignal::new(OrdersState::default());
    let chat = RwSignal::new(ChatState::welcome());
    let ui = RwSignal::new(UiState::default());

    provide_context(auth);
    provide_context(cart);
    provide_context(products);
    provide_context(orders);
    provide_context(chat);
    provide_context(ui);

    // Session bring-up. Runs once on the client after hydration.
    Effect::new(move || {
        let svc = services();

        // A new identity invalidates everything scoped to the old one.
        svc.session.set_identity_change_hook(move || {
            cart.set(CartState::default());
            orders.set(OrdersState::default());
            chat.set(ChatState::welcome());
        });
        svc.session.set_session_expired_hook(move || {
            auth.update(|a| {
                a.user = None;
                a.loading = false;
            });
        });

        leptos::task::spawn_local(async move {
            let svc = services();
            svc.session.initialize().await;

            let user = if svc.session.is_authenticated() {
                match crate::net::api::fetch_current_user(&svc.gateway).await {
                    Ok(record) => Some(record),
                    // Bring-up fetches can themselves expire the session.
                    Err(_) => svc.session.current_user(),
                }
            } else {
                None
            };

            if user.is_some() {
                if let Ok(fresh) = crate::net::api::fetch_cart(&svc.gateway).await {
                    cart.update(|c| c.cart = fresh);
                }
            }
            auth.set(AuthState {
                user,
                loading: false,
            });
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/nextech-storefront.css"/>
        <Title text="NexTechAI"/>

        <Router>
            <Navbar/>
            <Notices/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("products") view=ProductsPage/>
                    <Route
                        path=(StaticSegment("products"), ParamSegment("id"))
                        view=ProductDetailPage
                    />
                    <Route path=StaticSegment("cart") view=CartPage/>
                    <Route path=StaticSegment("orders") view=OrdersPage/>
                    <Route path=StaticSegment("chat") view=ChatPage/>
                </Routes>
            </main>
        </Router>
    }
}

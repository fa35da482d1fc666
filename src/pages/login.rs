//! Login page for username/password sessions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::cart::CartState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let navigate = use_navigate();

    // Already signed in — go home.
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let pending = RwSignal::new(false);

    let submit = Callback::new(move |_: ()| {
        let name = username.get().trim().to_owned();
        let pass = password.get();
        if name.is_empty() || pass.is_empty() {
            error.set(Some("Username and password are required.".to_owned()));
            return;
        }
        error.set(None);
        pending.set(true);
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match svc.session.login(&name, &pass).await {
                Ok(user) => {
                    if let Ok(fresh) = crate::net::api::fetch_cart(&svc.gateway).await {
                        cart.update(|c| c.cart = fresh);
                    }
                    // The redirect effect above navigates home once the
                    // user lands in the auth signal.
                    auth.set(AuthState { user: Some(user), loading: false });
                }
                Err(err) => {
                    pending.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    });

    view! {
        <div class="auth-page">
            <h1>"NexTechAI"</h1>
            <p>"Sign in to your account"</p>
            <label class="auth-page__label">
                "Username"
                <input
                    class="auth-page__input"
                    type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
            </label>
            <label class="auth-page__label">
                "Password"
                <input
                    class="auth-page__input"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit.run(());
                        }
                    }
                />
            </label>
            {move || error.get().map(|msg| view! { <p class="auth-page__error">{msg}</p> })}
            <button
                class="btn btn--primary"
                disabled=move || pending.get()
                on:click=move |_| submit.run(())
            >
                {move || if pending.get() { "Signing In..." } else { "Sign In" }}
            </button>
            <p class="auth-page__switch">
                "New here? " <a href="/register">"Create an account"</a>
            </p>
        </div>
    }
}

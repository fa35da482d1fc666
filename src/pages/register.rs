//! Registration page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let pending = RwSignal::new(false);

    let submit = Callback::new(move |_: ()| {
        let name = username.get().trim().to_owned();
        let mail = email.get().trim().to_owned();
        let pass = password.get();
        if name.is_empty() || mail.is_empty() || pass.is_empty() {
            error.set(Some("All fields are required.".to_owned()));
            return;
        }
        if pass != confirm.get() {
            error.set(Some("Passwords do not match.".to_owned()));
            return;
        }
        error.set(None);
        pending.set(true);
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            match svc.session.register(&name, &mail, &pass).await {
                Ok(user) => {
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
            <h1>"Create Account"</h1>
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
                "Email"
                <input
                    class="auth-page__input"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label class="auth-page__label">
                "Password"
                <input
                    class="auth-page__input"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <label class="auth-page__label">
                "Confirm Password"
                <input
                    class="auth-page__input"
                    type="password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
            </label>
            {move || error.get().map(|msg| view! { <p class="auth-page__error">{msg}</p> })}
            <button
                class="btn btn--primary"
                disabled=move || pending.get()
                on:click=move |_| submit.run(())
            >
                {move || if pending.get() { "Creating..." } else { "Create Account" }}
            </button>
            <p class="auth-page__switch">
                "Already have an account? " <a href="/login">"Sign in"</a>
            </p>
        </div>
    }
}

//! Conversation page for Alex, the shopping assistant.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::product_card::ProductCard;
use crate::state::auth::AuthState;
use crate::state::cart::CartState;
use crate::state::chat::{ChatRole, ChatState};
use crate::state::ui::UiState;

#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let cart = expect_context::<RwSignal<CartState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    let draft = RwSignal::new(String::new());

    let send = Callback::new(move |text: String| {
        let message = text.trim().to_owned();
        if message.is_empty() || chat.get_untracked().pending {
            return;
        }
        chat.update(|c| c.push_user(&message));
        draft.set(String::new());
        leptos::task::spawn_local(async move {
            let svc = crate::app::services();
            let session_id = chat.get_untracked().session_id;
            match crate::net::api::send_chat_message(&svc.gateway, &message, session_id.as_deref())
                .await
            {
                Ok(reply) => chat.update(|c| c.push_reply(reply)),
                Err(err) => {
                    chat.update(|c| c.pending = false);
                    ui.update(|u| u.push_error(&err.to_string()));
                }
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
        <div class="chat-page">
            <header class="chat-page__header">
                <h1>"Alex"</h1>
                <p>"Your AI shopping assistant"</p>
            </header>

            <div class="chat-page__thread">
                {move || {
                    chat.get()
                        .entries
                        .into_iter()
                        .map(|entry| {
                            let class = match entry.role {
                                ChatRole::User => "chat-bubble chat-bubble--user",
                                ChatRole::Assistant => "chat-bubble chat-bubble--assistant",
                            };
                            view! {
                                <div class=class>
                                    <p>{entry.content}</p>
                                    <Show when={
                                        let has_products = !entry.products.is_empty();
                                        move || has_products
                                    }>
                                        <div class="chat-bubble__products">
                                            {entry
                                                .products
                                                .clone()
                                                .into_iter()
                                                .map(|product| {
                                                    view! { <ProductCard product=product on_add=on_add/> }
                                                })
                                                .collect::<Vec<_>>()}
                                        </div>
                                    </Show>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <Show when=move || chat.get().pending>
                    <div class="chat-bubble chat-bubble--assistant chat-bubble--typing">
                        <p>"Alex is thinking..."</p>
                    </div>
                </Show>
            </div>

            <div class="chat-page__suggestions">
                {move || {
                    chat.get()
                        .current_suggestions()
                        .into_iter()
                        .map(|suggestion| {
                            let text = suggestion.clone();
                            view! {
                                <button
                                    class="chat-page__chip"
                                    on:click=move |_| send.run(text.clone())
                                >
                                    {suggestion}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>

            <div class="chat-page__composer">
                <input
                    type="text"
                    placeholder="Ask about products..."
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            send.run(draft.get_untracked());
                        }
                    }
                />
                <button
                    class="btn btn--primary"
                    disabled=move || chat.get().pending
                    on:click=move |_| send.run(draft.get_untracked())
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

//! Transient toast notices stacked in a corner of the viewport.

use leptos::prelude::*;

use crate::state::ui::{NoticeKind, UiState};

#[component]
pub fn Notices() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="notices">
            {move || {
                ui.get()
                    .notices
                    .into_iter()
                    .map(|notice| {
                        let id = notice.id.clone();
                        let class = match notice.kind {
                            NoticeKind::Success => "notice notice--success",
                            NoticeKind::Error => "notice notice--error",
                        };
                        view! {
                            <div class=class>
                                <span>{notice.text.clone()}</span>
                                <button
                                    class="notice__dismiss"
                                    on:click=move |_| ui.update(|u| u.dismiss(&id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

//! Modal checkout form collecting shipping and payment details.

use leptos::prelude::*;

use crate::net::types::NewOrder;

/// Checkout dialog. Validates locally, then hands a [`NewOrder`] to the
/// caller; the caller owns the network call and the pending flag.
#[component]
pub fn CheckoutForm(
    on_submit: Callback<NewOrder>,
    on_cancel: Callback<()>,
    pending: Signal<bool>,
) -> impl IntoView {
    let shipping = RwSignal::new(String::new());
    let billing = RwSignal::new(String::new());
    let payment = RwSignal::new("credit_card".to_owned());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let submit = Callback::new(move |_: ()| {
        if shipping.get().trim().is_empty()
            || email.get().trim().is_empty()
            || phone.get().trim().is_empty()
        {
            error.set(Some("Shipping address, email, and phone are required.".to_owned()));
            return;
        }
        error.set(None);
        let billing_value = billing.get();
        let billing_trimmed = billing_value.trim();
        on_submit.run(NewOrder {
            shipping_address: shipping.get().trim().to_owned(),
            billing_address: (!billing_trimmed.is_empty()).then(|| billing_trimmed.to_owned()),
            payment_method: payment.get(),
            customer_email: email.get().trim().to_owned(),
            customer_phone: phone.get().trim().to_owned(),
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Checkout"</h2>
                <label class="dialog__label">
                    "Shipping Address"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || shipping.get()
                        on:input=move |ev| shipping.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Billing Address (optional)"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || billing.get()
                        on:input=move |ev| billing.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Payment Method"
                    <select
                        class="dialog__input"
                        on:change=move |ev| payment.set(event_target_value(&ev))
                    >
                        <option value="credit_card" selected=true>"Credit Card"</option>
                        <option value="paypal">"PayPal"</option>
                        <option value="bank_transfer">"Bank Transfer"</option>
                    </select>
                </label>
                <label class="dialog__label">
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Phone"
                    <input
                        class="dialog__input"
                        type="tel"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                </label>
                {move || {
                    error.get().map(|msg| view! { <p class="dialog__error">{msg}</p> })
                }}
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || pending.get()
                        on:click=move |_| submit.run(())
                    >
                        {move || if pending.get() { "Placing Order..." } else { "Place Order" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

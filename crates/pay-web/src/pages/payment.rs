//! Payment Page

use std::rc::Rc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use pay_core::{
    CollectorConfig, CollectorState, FormField, FormState, PaymentCollector, PaymentStatus,
    Submission,
};

use crate::api::HttpIssuer;
use crate::components::{FormRow, StatusAlert};
use crate::stripe_js::StripeCard;

const CARD_SELECTOR: &str = "#card-element";

#[component]
pub fn PaymentPage() -> impl IntoView {
    let config = CollectorConfig::from_build_env();
    if !config.has_publishable_key() {
        leptos::logging::warn!("STRIPE_PUBLISHABLE_KEY was not set at build time");
    }

    let collector = StoredValue::new_local(Rc::new(PaymentCollector::new(
        HttpIssuer::new(config.intent_endpoint()),
        config.currency.clone(),
    )));
    let card = StoredValue::new_local(None::<StripeCard>);

    let (form, set_form) = signal(FormState::default());
    // Raw amount text, so partial input like "12." survives re-rendering
    let (amount_text, set_amount_text) = signal(FormState::default().amount.to_string());
    let (status, set_status) = signal(PaymentStatus::None);
    let (phase, set_phase) = signal(CollectorState::Idle);
    let (ready, set_ready) = signal(false);
    let (not_ready_notice, set_not_ready_notice) = signal(false);

    // Mount the card widget once the container is in the DOM
    let publishable_key = config.publishable_key;
    Effect::new(move |_| {
        if card.with_value(Option::is_some) {
            return;
        }
        match StripeCard::mount(&publishable_key, CARD_SELECTOR) {
            Ok(mounted) => {
                card.set_value(Some(mounted));
                set_ready.set(true);
            }
            Err(e) => leptos::logging::error!("Card widget unavailable: {}", e),
        }
    });

    let edit = move |field: FormField, raw: String| {
        set_form.set(form.get_untracked().with_input(field, &raw));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if phase.get_untracked().is_busy() {
            return;
        }

        let current = form.get_untracked();
        let previous = status.get_untracked();
        let collector = collector.get_value();
        let card = card.get_value();

        leptos::task::spawn_local(async move {
            let submission = collector
                .submit_with(card.as_ref(), &current, &previous, |state| set_phase.set(state))
                .await;

            match submission {
                Submission::NotReady => set_not_ready_notice.set(true),
                Submission::Resolved(resolution) => {
                    leptos::logging::log!("Payment resolved: {:?}", resolution.outcome);
                    set_not_ready_notice.set(false);
                    set_status.set(resolution.status);
                    set_amount_text.set(resolution.form.amount.to_string());
                    set_form.set(resolution.form);
                }
            }
        });
    };

    view! {
        <div class="container">
            <div class="row justify-content-center mt-5">
                <div class="col-md-6">
                    <div class="card shadow-lg border-0 rounded-lg">
                        <div class="card-header bg-primary text-white text-center py-3">
                            <h3>"Payment Form"</h3>
                        </div>
                        <div class="card-body p-4">
                            <form on:submit=on_submit>
                                <FormRow id="name" label="Name">
                                    <input
                                        type="text"
                                        class="form-control"
                                        id="name"
                                        name="name"
                                        placeholder="Enter your name"
                                        required
                                        prop:value=move || form.get().name
                                        on:input=move |ev| {
                                            edit(FormField::Name, event_target_value(&ev));
                                        }
                                    />
                                </FormRow>

                                <FormRow id="email" label="Email">
                                    <input
                                        type="email"
                                        class="form-control"
                                        id="email"
                                        name="email"
                                        placeholder="Enter your email"
                                        required
                                        prop:value=move || form.get().email
                                        on:input=move |ev| {
                                            edit(FormField::Email, event_target_value(&ev));
                                        }
                                    />
                                </FormRow>

                                <FormRow id="amount" label="Amount (USD)">
                                    <input
                                        type="number"
                                        step="0.01"
                                        class="form-control"
                                        id="amount"
                                        name="amount"
                                        placeholder="Enter the amount"
                                        required
                                        prop:value=amount_text
                                        on:input=move |ev| {
                                            let raw = event_target_value(&ev);
                                            edit(FormField::Amount, raw.clone());
                                            set_amount_text.set(raw);
                                        }
                                    />
                                </FormRow>

                                <FormRow id="card-element" label="Card Details">
                                    <div id="card-element" class="form-control"></div>
                                </FormRow>

                                <div class="d-grid">
                                    <button
                                        type="submit"
                                        class="btn btn-primary btn-block"
                                        disabled=move || !ready.get() || phase.get().is_busy()
                                    >
                                        {move || {
                                            if phase.get().is_busy() {
                                                "Processing...".to_string()
                                            } else {
                                                format!("Pay ${}", form.get().amount)
                                            }
                                        }}
                                    </button>
                                </div>

                                <Show when=move || not_ready_notice.get()>
                                    <div class="alert alert-warning mt-3">
                                        "The payment form is still loading. "
                                        "Please try again in a moment."
                                    </div>
                                </Show>
                                <StatusAlert status=status />
                            </form>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

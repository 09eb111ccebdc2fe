//! UI Components

use leptos::prelude::*;
use pay_core::PaymentStatus;

/// Status message under the form, hidden until the first submission
#[component]
pub fn StatusAlert(#[prop(into)] status: Signal<PaymentStatus>) -> impl IntoView {
    view! {
        <Show when=move || status.get().is_visible()>
            <div class="alert alert-info mt-3">{move || status.get().to_string()}</div>
        </Show>
    }
}

/// Labelled form row
#[component]
pub fn FormRow(id: &'static str, label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="form-group mb-3">
            <label for=id>{label}</label>
            {children()}
        </div>
    }
}

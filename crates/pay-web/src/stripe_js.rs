//! Stripe.js Bindings
//!
//! Raw wasm-bindgen handles for the card element flow plus the
//! [`StripeCard`] wrapper the payment collector confirms through.

use async_trait::async_trait;
use pay_core::collector::{CardConfirmer, Confirmation};
use pay_core::{BillingDetails, ClientSecret, CollectorError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Object, Promise, Reflect};

#[wasm_bindgen]
extern "C" {
    /// Raw Stripe.js client handle
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Raw Elements factory handle
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// Raw card element handle
    #[derive(Debug, Clone)]
    pub type JsCardElement;

    /// `Stripe("pk_test_...")`
    #[wasm_bindgen(catch, js_name = Stripe)]
    fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    /// `stripe.elements()`
    #[wasm_bindgen(method, catch)]
    fn elements(this: &JsStripe) -> Result<JsElements, JsValue>;

    /// `elements.create("card")`
    #[wasm_bindgen(method, catch, js_name = create)]
    fn create_element(this: &JsElements, element_type: &str) -> Result<JsCardElement, JsValue>;

    /// `card.mount("#card-element")`
    #[wasm_bindgen(method, catch)]
    fn mount(this: &JsCardElement, selector: &str) -> Result<(), JsValue>;

    /// `card.clear()`
    #[wasm_bindgen(method)]
    fn clear(this: &JsCardElement);

    /// `stripe.confirmCardPayment(clientSecret, data)` → `Promise`
    #[wasm_bindgen(method, catch, js_name = confirmCardPayment)]
    fn confirm_card_payment(
        this: &JsStripe,
        client_secret: &str,
        data: &JsValue,
    ) -> Result<Promise, JsValue>;
}

/// Convert any JS exception or rejection into a collector error
fn js_error(value: JsValue) -> CollectorError {
    let message = Reflect::get(&value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    CollectorError::Confirmation(message)
}

fn get_string(target: &JsValue, key: &str) -> Option<String> {
    Reflect::get(target, &key.into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.as_string())
}

/// Whether the Stripe.js script has loaded
pub fn stripe_loaded() -> bool {
    web_sys::window()
        .and_then(|w| Reflect::has(&w, &"Stripe".into()).ok())
        .unwrap_or(false)
}

/// Card element mounted on the page together with its Stripe instance
#[derive(Debug, Clone)]
pub struct StripeCard {
    stripe: JsStripe,
    card: JsCardElement,
}

impl StripeCard {
    /// Initialize Stripe.js, create a card element and mount it at `selector`
    pub fn mount(publishable_key: &str, selector: &str) -> pay_core::Result<Self> {
        if !stripe_loaded() {
            return Err(CollectorError::Confirmation("Stripe.js is not loaded".into()));
        }

        let stripe = new_stripe(publishable_key).map_err(js_error)?;
        let elements = stripe.elements().map_err(js_error)?;
        let card = elements.create_element("card").map_err(js_error)?;
        card.mount(selector).map_err(js_error)?;

        Ok(Self { stripe, card })
    }

    fn confirm_data(&self, billing: &BillingDetails) -> pay_core::Result<JsValue> {
        let set = |target: &Object, key: &str, value: &JsValue| {
            Reflect::set(target, &key.into(), value).map_err(js_error)
        };

        let billing_details = Object::new();
        set(&billing_details, "name", &billing.name.as_str().into())?;
        set(&billing_details, "email", &billing.email.as_str().into())?;

        let payment_method = Object::new();
        set(&payment_method, "card", self.card.as_ref())?;
        set(&payment_method, "billing_details", &billing_details)?;

        let data = Object::new();
        set(&data, "payment_method", &payment_method)?;

        Ok(data.into())
    }
}

#[async_trait(?Send)]
impl CardConfirmer for StripeCard {
    fn is_ready(&self) -> bool {
        stripe_loaded()
    }

    async fn confirm(
        &self,
        secret: &ClientSecret,
        billing: &BillingDetails,
    ) -> pay_core::Result<Confirmation> {
        let data = self.confirm_data(billing)?;
        let promise = self
            .stripe
            .confirm_card_payment(secret.expose(), &data)
            .map_err(js_error)?;
        let result = JsFuture::from(promise).await.map_err(js_error)?;

        // `{ error }` on failure, `{ paymentIntent }` otherwise
        let error = Reflect::get(&result, &"error".into()).map_err(js_error)?;
        if !error.is_undefined() && !error.is_null() {
            let message = get_string(&error, "message").unwrap_or_default();
            return Ok(Confirmation::Declined(message));
        }

        let intent = Reflect::get(&result, &"paymentIntent".into()).map_err(js_error)?;
        match get_string(&intent, "status") {
            Some(status) if status == "succeeded" => Ok(Confirmation::Succeeded),
            Some(status) => Ok(Confirmation::Pending(status)),
            None => Ok(Confirmation::Pending("unknown".into())),
        }
    }

    fn clear(&self) {
        self.card.clear();
    }
}

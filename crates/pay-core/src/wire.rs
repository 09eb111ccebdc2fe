//! JSON bodies exchanged between the payment form and the intent server

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{ClientSecret, PaymentRequest};

/// Body of `POST /api/create-payment-intent` as the server receives it.
///
/// Fields are kept as raw JSON and forwarded untouched, so the processor
/// alone decides what is acceptable. Missing fields are `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub amount: Value,

    #[serde(default)]
    pub currency: Value,
}

impl From<&PaymentRequest> for CreatePaymentIntentRequest {
    fn from(request: &PaymentRequest) -> Self {
        Self {
            amount: request.amount.into(),
            currency: request.currency.as_str().into(),
        }
    }
}

/// Successful reply of `POST /api/create-payment-intent`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: ClientSecret,
}

/// `{message}` body used by the diagnostic route and by every error reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply of `GET /api/test-strip`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub message: String,

    /// Balance object exactly as the processor returned it
    pub stripe_response: serde_json::Value,
}

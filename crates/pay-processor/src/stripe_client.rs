//! Stripe Integration
//!
//! Server half of the "Stripe Elements (Embedded)" flow: create a
//! PaymentIntent and hand its client secret to the browser, which confirms
//! the payment with Stripe.js.

use async_trait::async_trait;
use pay_core::ClientSecret;
use pay_core::wire::CreatePaymentIntentRequest;
use serde::Serialize;
use serde_json::Value;
use stripe::{Balance, Client, PaymentIntent};

use crate::error::{PaymentError, Result};
use crate::processor::{CreatedIntent, PaymentProcessor};

/// Environment variable holding the secret API key
pub const SECRET_KEY_VAR: &str = "STRIPE_SECRET_KEY";

/// Older variable name still accepted
pub const LEGACY_SECRET_KEY_VAR: &str = "SECRETE_STRIPE_KEY";

/// Form body for `POST /v1/payment_intents`.
///
/// Posted as the caller's raw values so Stripe validates amount and
/// currency itself. Missing values are left out of the form.
#[derive(Debug, Serialize)]
struct CreateIntentForm<'a> {
    #[serde(skip_serializing_if = "is_missing")]
    amount: &'a Value,

    #[serde(skip_serializing_if = "is_missing")]
    currency: &'a Value,
}

fn is_missing(value: &&Value) -> bool {
    value.is_null()
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret_key = lookup(SECRET_KEY_VAR)
            .or_else(|| lookup(LEGACY_SECRET_KEY_VAR))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PaymentError::Config(format!("{SECRET_KEY_VAR} not set")))?;

        Ok(Self::new(secret_key.trim()))
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_intent(&self, request: &CreatePaymentIntentRequest) -> Result<CreatedIntent> {
        let form = CreateIntentForm {
            amount: &request.amount,
            currency: &request.currency,
        };

        let intent: PaymentIntent = self.client.post_form("/payment_intents", form).await?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Stripe("No client secret returned".into()))?;

        tracing::info!(
            intent_id = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            "Created payment intent"
        );

        Ok(CreatedIntent {
            id: intent.id.to_string(),
            client_secret: ClientSecret::new(client_secret),
            amount: intent.amount,
            currency: intent.currency.to_string(),
        })
    }

    async fn retrieve_balance(&self) -> Result<serde_json::Value> {
        let balance: Balance = self.client.get("/balance").await?;
        tracing::debug!(livemode = balance.livemode, "Retrieved Stripe balance");

        Ok(serde_json::to_value(balance)?)
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

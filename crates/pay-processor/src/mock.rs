//! Mock Payment Processor
//!
//! For testing and demo purposes. Rejects the request shapes Stripe
//! rejects, with Stripe's messages, and hands out fake client secrets.

use async_trait::async_trait;
use pay_core::ClientSecret;
use pay_core::wire::CreatePaymentIntentRequest;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{PaymentError, Result};
use crate::processor::{CreatedIntent, PaymentProcessor};

/// Mock processor that never leaves the process
pub struct MockProcessor {
    received: AtomicU64,
    created: AtomicU64,
    balance_error: Option<String>,
}

impl Default for MockProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProcessor {
    pub fn new() -> Self {
        Self {
            received: AtomicU64::new(0),
            created: AtomicU64::new(0),
            balance_error: None,
        }
    }

    /// Create a processor whose balance lookups fail with `message`
    pub fn with_balance_error(message: impl Into<String>) -> Self {
        Self {
            balance_error: Some(message.into()),
            ..Self::new()
        }
    }

    /// Number of create-intent calls that reached the processor
    pub fn requests_received(&self) -> u64 {
        self.received.load(Ordering::SeqCst)
    }

    /// Number of intents created so far
    pub fn intents_created(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }
}

/// Form-encoded text of a raw value, as Stripe would receive it
fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn missing(name: &str) -> PaymentError {
    PaymentError::Rejected(format!("Missing required param: {name}."))
}

/// Stripe accepts integers and integer strings for amounts
fn parse_amount(value: &Value) -> Result<i64> {
    if value.is_null() {
        return Err(missing("amount"));
    }

    let text = param_text(value);
    let amount = value
        .as_i64()
        .or_else(|| text.trim().parse().ok())
        .ok_or_else(|| PaymentError::Rejected(format!("Invalid integer: {text}")))?;

    if amount < 1 {
        return Err(PaymentError::Rejected(
            "This value must be greater than or equal to 1.".into(),
        ));
    }
    Ok(amount)
}

fn parse_currency(value: &Value) -> Result<String> {
    let currency = match value {
        Value::Null => return Err(missing("currency")),
        Value::String(s) => s.as_str(),
        other => return Err(PaymentError::Rejected(format!("Invalid currency: {other}"))),
    };

    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(currency.to_lowercase())
    } else {
        Err(PaymentError::Rejected(format!("Invalid currency: {currency}")))
    }
}

#[async_trait]
impl PaymentProcessor for MockProcessor {
    async fn create_intent(&self, request: &CreatePaymentIntentRequest) -> Result<CreatedIntent> {
        self.received.fetch_add(1, Ordering::SeqCst);

        let amount = parse_amount(&request.amount)?;
        let currency = parse_currency(&request.currency)?;

        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("pi_mock_{n}");
        let secret = format!("{id}_secret_{}", uuid::Uuid::new_v4().simple());

        Ok(CreatedIntent {
            id,
            client_secret: ClientSecret::new(secret),
            amount,
            currency,
        })
    }

    async fn retrieve_balance(&self) -> Result<serde_json::Value> {
        if let Some(message) = &self.balance_error {
            return Err(PaymentError::Rejected(message.clone()));
        }

        Ok(serde_json::json!({
            "object": "balance",
            "livemode": false,
            "available": [{ "amount": 0, "currency": "usd" }],
            "pending": [{ "amount": 0, "currency": "usd" }],
        }))
    }

    fn name(&self) -> &str {
        "MockProcessor"
    }
}

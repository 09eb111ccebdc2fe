//! Payment Processor Strategy
//!
//! The intent server only needs two calls from a processor. Implement
//! [`PaymentProcessor`] for each backend: Stripe in production,
//! [`MockProcessor`](crate::MockProcessor) in tests.

use async_trait::async_trait;
use pay_core::ClientSecret;
use pay_core::wire::CreatePaymentIntentRequest;

use crate::error::Result;

/// A payment intent freshly created on the processor
#[derive(Clone, Debug)]
pub struct CreatedIntent {
    /// Processor-side intent id (`pi_...`)
    pub id: String,

    /// Secret the client uses to confirm this intent
    pub client_secret: ClientSecret,

    pub amount: i64,
    pub currency: String,
}

/// Processor client trait (Strategy pattern)
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment intent.
    ///
    /// Amount and currency are forwarded untouched, whatever their JSON type;
    /// the processor is the only validator.
    async fn create_intent(&self, request: &CreatePaymentIntentRequest) -> Result<CreatedIntent>;

    /// Fetch the account balance, as returned by the processor
    async fn retrieve_balance(&self) -> Result<serde_json::Value>;

    /// Processor name
    fn name(&self) -> &str;
}

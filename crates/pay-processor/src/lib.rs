//! # pay-processor
//!
//! Payment processor integration for the intent server.
//!
//! ## Embedded card flow
//!
//! ```text
//! ┌──────────────┐ 1. amount  ┌──────────────┐ 2. create intent ┌──────────┐
//! │ Browser form │───────────▶│ Intent server│─────────────────▶│  Stripe  │
//! │ (card iframe)│◀───────────│              │◀─────────────────│          │
//! └──────┬───────┘ 3. secret  └──────────────┘                  └────▲─────┘
//!        └───────────────── 4. confirmCardPayment(secret) ───────────┘
//! ```
//!
//! Card data never reaches the server: Stripe's card element is an iframe
//! and confirmation happens in the browser.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pay_processor::{PaymentProcessor, StripeClient};
//! use pay_core::wire::CreatePaymentIntentRequest;
//! use serde_json::json;
//!
//! let stripe = StripeClient::new("sk_test_xxx");
//! let request = CreatePaymentIntentRequest { amount: json!(1000), currency: json!("usd") };
//! let intent = stripe.create_intent(&request).await?;
//!
//! // Send intent.client_secret to the browser
//! ```

mod error;
mod mock;
mod processor;
mod stripe_client;

pub use error::{PaymentError, Result};
pub use mock::MockProcessor;
pub use processor::{CreatedIntent, PaymentProcessor};
pub use stripe_client::StripeClient;

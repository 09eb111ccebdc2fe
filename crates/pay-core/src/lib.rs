//! # pay-core
//!
//! Shared model and client-side workflow for the payment-intent demo.
//!
//! ## Round trip
//!
//! ```text
//! ┌──────────────┐  {amount, currency}  ┌──────────────┐  create intent  ┌───────────┐
//! │ Payment form │─────────────────────▶│ Intent server│────────────────▶│ Processor │
//! │  (collector) │◀─────────────────────│              │◀────────────────│           │
//! └──────┬───────┘    {clientSecret}    └──────────────┘                 └─────▲─────┘
//!        │              confirm card payment (secret + card + billing)          │
//!        └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The collector talks to both remote parties through two traits,
//! [`IntentIssuer`] and [`CardConfirmer`], so the workflow runs the same in
//! the browser and in tests.

pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod wire;

pub use collector::{
    CardConfirmer, CollectorState, Confirmation, IntentIssuer, Outcome, PaymentCollector,
    Resolution, Submission,
};
pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use model::{
    BillingDetails, ClientSecret, FormField, FormState, PaymentRequest, PaymentStatus,
    parse_amount, to_minor_units,
};

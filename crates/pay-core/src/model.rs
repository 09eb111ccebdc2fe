//! Payment Domain Model
//!
//! Values that live for exactly one form submission. Nothing here is
//! persisted or shared across requests.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minor units per major unit. Assumes a two-decimal currency such as USD.
pub const MINOR_UNITS_PER_MAJOR: Decimal = dec!(100);

/// Default currency sent with every request
pub const DEFAULT_CURRENCY: &str = "usd";

/// Convert a user-facing amount into integer minor units.
///
/// Multiplies by 100 and truncates toward zero, so `12.345` becomes `1234`.
/// Amounts outside the `i64` range saturate.
pub fn to_minor_units(amount: Decimal) -> i64 {
    let saturated = if amount.is_sign_negative() { i64::MIN } else { i64::MAX };

    amount
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|minor| minor.trunc().to_i64())
        .unwrap_or(saturated)
}

/// Parse user-entered amount text. Empty or unparseable input is zero.
pub fn parse_amount(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Amount and currency handed to the intent issuer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount in minor currency units (cents for USD)
    pub amount: i64,

    /// Lowercase ISO currency code, forwarded as-is
    pub currency: String,
}

impl PaymentRequest {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Build the request for a submitted form
    pub fn from_form(form: &FormState, currency: &str) -> Self {
        Self::new(to_minor_units(form.amount), currency)
    }
}

/// Opaque single-use token authorizing the client to complete one intent
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw token, for handing to the processor's client library
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Payment intent id embedded in the secret (`pi_xxx_secret_yyy`)
    pub fn intent_id(&self) -> Option<&str> {
        self.0.split_once("_secret_").map(|(id, _)| id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.intent_id() {
            Some(id) => write!(f, "ClientSecret({id}_secret_***)"),
            None => f.write_str("ClientSecret(***)"),
        }
    }
}

/// Editable form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Amount,
}

/// Payer-entered form contents.
///
/// Treated as a value: every edit produces a new `FormState`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,

    /// Amount in major units (dollars)
    pub amount: Decimal,
}

impl FormState {
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_amount(self, amount: Decimal) -> Self {
        Self { amount, ..self }
    }

    /// Apply raw input text to one field
    #[must_use]
    pub fn with_input(self, field: FormField, raw: &str) -> Self {
        match field {
            FormField::Name => self.with_name(raw),
            FormField::Email => self.with_email(raw),
            FormField::Amount => self.with_amount(parse_amount(raw)),
        }
    }

    pub fn billing_details(&self) -> BillingDetails {
        BillingDetails {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Billing details attached to the card confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
}

/// Status message shown under the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Nothing submitted yet
    #[default]
    None,
    Succeeded,
    /// Confirmation rejected by the processor
    Failed(String),
    /// Network or unexpected failure
    Errored,
}

impl PaymentStatus {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Succeeded => f.write_str("Payment succeeded!"),
            Self::Failed(message) => write!(f, "Payment failed: {message}"),
            Self::Errored => f.write_str("Error processing payment."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_from_dollars() {
        assert_eq!(to_minor_units(dec!(12.34)), 1234);
        assert_eq!(to_minor_units(dec!(10)), 1000);
        assert_eq!(to_minor_units(Decimal::ZERO), 0);
    }

    #[test]
    fn test_minor_units_truncate_fractional_cents() {
        assert_eq!(to_minor_units(dec!(12.345)), 1234);
        assert_eq!(to_minor_units(dec!(0.999)), 99);
        assert_eq!(to_minor_units(dec!(-5.019)), -501);
    }

    #[test]
    fn test_minor_units_saturate() {
        assert_eq!(to_minor_units(Decimal::MAX), i64::MAX);
        assert_eq!(to_minor_units(Decimal::MIN), i64::MIN);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.34"), dec!(12.34));
        assert_eq!(parse_amount(" 7 "), dec!(7));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("ten"), Decimal::ZERO);
        assert_eq!(parse_amount("-3"), dec!(-3));
    }

    #[test]
    fn test_request_from_form() {
        let form = FormState::default().with_input(FormField::Amount, "12.34");
        let request = PaymentRequest::from_form(&form, DEFAULT_CURRENCY);
        assert_eq!(request, PaymentRequest::new(1234, "usd"));
    }

    #[test]
    fn test_form_updates_are_values() {
        let empty = FormState::default();
        let filled = empty
            .clone()
            .with_input(FormField::Name, "Ada")
            .with_input(FormField::Email, "ada@example.com");

        assert_eq!(empty, FormState::default());
        assert_eq!(filled.name, "Ada");
        assert_eq!(filled.email, "ada@example.com");
        assert_eq!(filled.amount, Decimal::ZERO);
    }

    #[test]
    fn test_client_secret_debug_is_redacted() {
        let secret = ClientSecret::new("pi_123_secret_abc");
        assert_eq!(secret.intent_id(), Some("pi_123"));
        assert_eq!(format!("{secret:?}"), "ClientSecret(pi_123_secret_***)");
        assert_eq!(format!("{:?}", ClientSecret::new("opaque")), "ClientSecret(***)");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(PaymentStatus::None.to_string(), "");
        assert_eq!(PaymentStatus::Succeeded.to_string(), "Payment succeeded!");
        assert_eq!(
            PaymentStatus::Failed("Your card was declined.".into()).to_string(),
            "Payment failed: Your card was declined."
        );
        assert_eq!(PaymentStatus::Errored.to_string(), "Error processing payment.");
        assert!(!PaymentStatus::None.is_visible());
    }
}

//! Client Configuration
//!
//! Resolved once when the payment form mounts and passed down by value.

use crate::model::DEFAULT_CURRENCY;

/// Route on the intent server that creates payment intents
pub const CREATE_INTENT_PATH: &str = "/api/create-payment-intent";

/// Intent server used when no base URL is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:5001";

/// Settings the payment form needs from its environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Processor publishable key (`pk_test_...`)
    pub publishable_key: String,

    /// Base URL of the intent server
    pub api_base: String,

    /// Currency sent with every request
    pub currency: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            publishable_key: String::new(),
            api_base: DEFAULT_API_BASE.into(),
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}

impl CollectorConfig {
    /// Build from values baked in at compile time.
    ///
    /// Reads `STRIPE_PUBLISHABLE_KEY`, `PAYMENT_API_BASE` and `PAYMENT_CURRENCY`.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("STRIPE_PUBLISHABLE_KEY"),
            option_env!("PAYMENT_API_BASE"),
            option_env!("PAYMENT_CURRENCY"),
        )
    }

    /// Build from optional values, falling back to defaults for missing or blank ones
    pub fn from_values(
        publishable_key: Option<&str>,
        api_base: Option<&str>,
        currency: Option<&str>,
    ) -> Self {
        let pick = |value: Option<&str>, fallback: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            publishable_key: pick(publishable_key, ""),
            api_base: pick(api_base, DEFAULT_API_BASE),
            currency: pick(currency, DEFAULT_CURRENCY),
        }
    }

    /// Full URL of the create-intent route
    pub fn intent_endpoint(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), CREATE_INTENT_PATH)
    }

    pub fn has_publishable_key(&self) -> bool {
        !self.publishable_key.is_empty()
    }
}

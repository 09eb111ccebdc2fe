//! Processor Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment processor errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Processor rejected the request; carries the processor's own message
    #[error("{0}")]
    Rejected(String),

    /// Processor could not be reached or answered unexpectedly
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    /// Message returned to HTTP callers.
    ///
    /// Processor messages are passed through unfiltered.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Rejected(msg) | PaymentError::Stripe(msg) => msg.clone(),
            PaymentError::Config(_) => "Payments not configured".into(),
            PaymentError::Json(e) => e.to_string(),
        }
    }
}

impl From<stripe::StripeError> for PaymentError {
    fn from(err: stripe::StripeError) -> Self {
        match err {
            stripe::StripeError::Stripe(request) => {
                PaymentError::Rejected(request.message.unwrap_or_else(|| {
                    format!("Stripe request failed with status {}", request.http_status)
                }))
            }
            other => PaymentError::Stripe(other.to_string()),
        }
    }
}

//! Collector Error Types

use thiserror::Error;

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Failures on the client side of the payment round trip
#[derive(Error, Debug)]
pub enum CollectorError {
    /// The intent server could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The intent server answered with a non-success status
    #[error("Intent rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The intent server answered without a usable client secret
    #[error("Response did not contain a client secret")]
    MissingSecret,

    /// The processor's client library threw instead of returning a result
    #[error("Confirmation error: {0}")]
    Confirmation(String),
}

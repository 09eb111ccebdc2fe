//! Application State

use std::sync::Arc;

use pay_processor::PaymentProcessor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment processor (optional - None if not configured)
    pub processor: Option<Arc<dyn PaymentProcessor>>,
}

impl AppState {
    pub fn new(processor: Option<Arc<dyn PaymentProcessor>>) -> Self {
        Self { processor }
    }
}

//! HTTP Handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use pay_core::wire::{
    BalanceResponse, CreatePaymentIntentRequest, CreatePaymentIntentResponse, MessageResponse,
};
use pay_processor::PaymentProcessor;

use crate::state::AppState;

/// Error reply: status plus `{message}` body
pub type ApiError = (StatusCode, Json<MessageResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(MessageResponse::new(message)))
}

fn require_processor(state: &AppState) -> Result<&Arc<dyn PaymentProcessor>, ApiError> {
    state
        .processor
        .as_ref()
        .ok_or_else(|| api_error(StatusCode::SERVICE_UNAVAILABLE, "Payments not configured"))
}

/// Diagnostic root endpoint
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("initial setup done from backend"))
}

/// Retrieve the processor balance to prove credentials work
pub async fn test_stripe(
    State(state): State<AppState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let processor = require_processor(&state)?;

    let balance = processor.retrieve_balance().await.map_err(|e| {
        tracing::error!("Balance retrieval failed: {}", e);
        api_error(StatusCode::BAD_REQUEST, e.user_message())
    })?;

    tracing::info!(processor = processor.name(), "Processor connected successfully");

    Ok(Json(BalanceResponse {
        message: "strip connected successfully".into(),
        stripe_response: balance,
    }))
}

/// Create a payment intent and return its client secret.
///
/// Any JSON object is accepted; amount and currency reach the processor as sent.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected payment intent body: {}", rejection);
        api_error(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let processor = require_processor(&state)?;

    let intent = processor.create_intent(&request).await.map_err(|e| {
        tracing::error!(
            amount = %request.amount,
            currency = %request.currency,
            "Payment intent error: {}",
            e
        );
        api_error(StatusCode::BAD_REQUEST, e.user_message())
    })?;

    tracing::info!(
        intent_id = %intent.id,
        amount = intent.amount,
        currency = %intent.currency,
        processor = processor.name(),
        "Issued client secret"
    );

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

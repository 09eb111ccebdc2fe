//! Router Assembly

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{create_payment_intent, root, test_stripe};
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState, static_dir: &Path) -> Router {
    // The payment form may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/test-strip", get(test_stripe))
        .route("/api/create-payment-intent", post(create_payment_intent))
        // Built WASM frontend
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

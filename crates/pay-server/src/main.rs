//! Payment Intent Server
//!
//! Axum-based server that creates payment intents for the browser payment
//! form and hands back their client secrets. Payment confirmation happens
//! client-side; the server never sees the outcome.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pay_processor::{PaymentProcessor, StripeClient};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Initialize payments
    let processor = match StripeClient::from_env() {
        Ok(stripe) => {
            tracing::info!("✓ Stripe configured");
            Some(Arc::new(stripe) as Arc<dyn PaymentProcessor>)
        }
        Err(e) => {
            tracing::warn!("⚠ Stripe not configured - payments disabled ({})", e);
            tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
            None
        }
    };

    let app = app::router(AppState::new(processor), &config.static_dir);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server is running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                          - Diagnostic message");
    tracing::info!("  GET  /api/test-strip            - Check Stripe credentials");
    tracing::info!("  POST /api/create-payment-intent - Create payment intent");
    tracing::info!("  Static files from {}", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}

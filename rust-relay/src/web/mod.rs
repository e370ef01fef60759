//! Web server module for the deployment relay.
//!
//! A single webhook route plus a health check:
//! - Authenticates Vercel deployment events by HMAC signature
//! - Reformats them into a chat message
//! - Forwards the message to the configured webhook

pub mod handlers;
pub mod signature;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    deployment_webhook, ensure_post, health, AppState, HealthResponse, SuccessResponse,
};
pub use signature::{compute_signature, verify_signature, SIGNATURE_HEADER};

/// Path the provider delivers deployment events to.
pub const WEBHOOK_PATH: &str = "/api/webhook";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(WEBHOOK_PATH, any(deployment_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Webhook endpoint handlers.
//!
//! The relay handler runs strictly in order:
//! 1. Reject anything but POST
//! 2. Resolve the secret and target URL
//! 3. Verify the signature over the raw body
//! 4. Parse the event and build the chat message
//! 5. Forward once and report the outcome
//!
//! The first failure ends the request.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::event::{build_message, InboundEvent};
use crate::forward::Forwarder;
use crate::web::signature::authenticate;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: Config, forwarder: Forwarder) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Deployment Webhook
// =============================================================================

/// Successful relay response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Only POST may reach the relay.
pub fn ensure_post(method: &Method) -> Result<(), RelayError> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(RelayError::MethodNotAllowed(method.to_string()))
    }
}

/// Deployment webhook endpoint.
///
/// Mounted for every method so that non-POST requests get the JSON 405 body.
/// The body is taken as raw bytes; signature verification sees exactly what
/// was sent. A body rejection (e.g. over the size limit) is only surfaced
/// after the method check, and always as a JSON error.
pub async fn deployment_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match relay(&state, &method, &headers, body).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(e) => {
            match &e {
                RelayError::MethodNotAllowed(_) | RelayError::Unauthorized(_) => {
                    warn!(method = %method, reason = %e, "webhook_rejected")
                }
                RelayError::MalformedPayload(_) | RelayError::PayloadTooLarge(_) => {
                    warn!(reason = %e, "webhook_rejected")
                }
                RelayError::ConfigurationMissing { .. } | RelayError::ForwardingFailure(_) => {
                    error!(reason = %e, "webhook_failed")
                }
            }
            e.into_response()
        }
    }
}

async fn relay(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(), RelayError> {
    ensure_post(method)?;

    let credentials = state.config.credentials()?;

    let raw_body = body?;

    authenticate(headers, &raw_body, credentials.secret)?;

    let event = InboundEvent::parse(&raw_body)?;
    info!(
        body_length = raw_body.len(),
        event_id = ?event.id,
        event_type = ?event.event_type,
        deployment_id = ?event.payload.deployment.id,
        "deployment_webhook_received"
    );

    let message = build_message(&event, &state.config.site_url)?;

    state
        .forwarder
        .send(credentials.target_url, &message)
        .await?;

    info!(event_id = ?event.id, "deployment_webhook_forwarded");

    Ok(())
}

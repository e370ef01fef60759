//! Request-terminal errors and their HTTP mapping.
//!
//! Every variant ends the request. The response body only ever carries the
//! fixed public message; the detail stays in the logs.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::forward::ForwardError;

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("signature header missing")]
    MissingHeader,
    #[error("signature header is not a single string value")]
    InvalidHeader,
    #[error("signature does not match request body")]
    SignatureMismatch,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("configuration missing (secret_set={secret_set}, target_url_set={target_url_set})")]
    ConfigurationMissing { secret_set: bool, target_url_set: bool },

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthFailure),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("forwarding failed: {0}")]
    ForwardingFailure(#[from] ForwardError),
}

/// JSON error body returned to the caller.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::ConfigurationMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RelayError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::ForwardingFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed in the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed(_) => "Method not allowed",
            RelayError::ConfigurationMissing { .. } => "Server configuration error",
            RelayError::Unauthorized(_) => "Unauthorized",
            RelayError::MalformedPayload(_) => "Malformed payload",
            RelayError::PayloadTooLarge(_) => "Payload too large",
            RelayError::ForwardingFailure(_) => "Failed to forward webhook",
        }
    }
}

impl From<BytesRejection> for RelayError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge(rejection.body_text())
        } else {
            RelayError::MalformedPayload(rejection.body_text())
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

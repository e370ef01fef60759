//! Single-attempt JSON POST to a Discord-style webhook.

use reqwest::{header, Client, StatusCode};
use thiserror::Error;

use crate::event::OutboundMessage;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("request to target failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("target responded with status {0}")]
    Status(StatusCode),
}

/// Posts messages to the destination webhook.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Default)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Deliver `message` to `target_url` once. Any non-2xx status is an error.
    pub async fn send(&self, target_url: &str, message: &OutboundMessage) -> Result<(), ForwardError> {
        tracing::info!(
            content_length = message.content.len(),
            "forward_starting"
        );

        let result = self
            .client
            .post(target_url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await;

        match result {
            Ok(resp) => {
                let status = resp.status();

                if status.is_success() {
                    tracing::info!(status_code = status.as_u16(), "forward_complete");
                    Ok(())
                } else {
                    tracing::error!(status_code = status.as_u16(), "forward_rejected");
                    Err(ForwardError::Status(status))
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::error!(error = %e, "forward_timeout");
                } else if e.is_connect() {
                    tracing::error!(error = %e, "forward_connect_error");
                } else {
                    tracing::error!(error = %e, "forward_error");
                }
                Err(ForwardError::Request(e))
            }
        }
    }
}

//! Vercel webhook signature verification.
//!
//! Vercel signs the raw request body with HMAC-SHA1 keyed by the integration
//! secret and sends the lowercase hex digest in `x-vercel-signature`.
//! Reference: https://vercel.com/docs/observability/webhooks-overview/webhooks-api#securing-webhooks

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::warn;

use crate::error::AuthFailure;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x-vercel-signature";

fn keyed_mac(secret: &str, raw_body: &[u8]) -> Option<HmacSha1> {
    match HmacSha1::new_from_slice(secret.as_bytes()) {
        Ok(mut mac) => {
            mac.update(raw_body);
            Some(mac)
        }
        Err(_) => {
            warn!("vercel_signature_invalid_key");
            None
        }
    }
}

/// Compute the lowercase hex HMAC-SHA1 of `raw_body` keyed by `secret`.
pub fn compute_signature(raw_body: &[u8], secret: &str) -> Option<String> {
    keyed_mac(secret, raw_body).map(|mac| hex::encode(mac.finalize().into_bytes()))
}

/// Verify a Vercel webhook signature.
///
/// `raw_body` must be the bytes exactly as received. Hashing a re-serialized
/// JSON value will not reproduce the sender's digest.
///
/// # Returns
///
/// `true` if `signature` is the lowercase hex digest of the body, `false` otherwise.
pub fn verify_signature(raw_body: &[u8], signature: &str, secret: &str) -> bool {
    if secret.is_empty() || signature.is_empty() {
        warn!(
            has_secret = !secret.is_empty(),
            has_signature = !signature.is_empty(),
            "vercel_signature_missing_fields"
        );
        return false;
    }

    // Vercel only emits lowercase hex
    if !signature.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        warn!(actual_length = signature.len(), "vercel_signature_not_lowercase_hex");
        return false;
    }

    let provided = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(actual_length = signature.len(), "vercel_signature_invalid_hex");
            return false;
        }
    };

    let mac = match keyed_mac(secret, raw_body) {
        Some(mac) => mac,
        None => return false,
    };

    // Constant-time comparison to prevent timing attacks
    let valid = mac.verify_slice(&provided).is_ok();

    if !valid {
        warn!(
            actual_length = provided.len(),
            body_length = raw_body.len(),
            "vercel_signature_mismatch"
        );
    }

    valid
}

/// Pull the signature out of the request headers.
///
/// The header must be present exactly once and be a visible-ASCII string.
pub fn signature_from_headers(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let mut values = headers.get_all(SIGNATURE_HEADER).iter();

    let value = values.next().ok_or(AuthFailure::MissingHeader)?;
    if values.next().is_some() {
        return Err(AuthFailure::InvalidHeader);
    }

    value.to_str().map_err(|_| AuthFailure::InvalidHeader)
}

/// Check the request headers and body against the shared secret.
pub fn authenticate(headers: &HeaderMap, raw_body: &[u8], secret: &str) -> Result<(), AuthFailure> {
    let signature = signature_from_headers(headers)?;

    if verify_signature(raw_body, signature, secret) {
        Ok(())
    } else {
        Err(AuthFailure::SignatureMismatch)
    }
}

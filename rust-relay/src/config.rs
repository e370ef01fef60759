//! Configuration module for environment variable parsing.
//!
//! The two secrets are optional at load time. A process without them still
//! starts, and every webhook request then fails closed (see [`Config::credentials`]).

use std::env;

use crate::error::RelayError;

/// Site linked from the extended notification when `SITE_URL` is unset.
pub const DEFAULT_SITE_URL: &str = "https://edh-elo-nextjs.vercel.app/";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared signing secret used as the HMAC key (`SECRET`)
    pub secret: Option<String>,

    /// Destination chat webhook URL (`TARGET_URL`)
    pub target_url: Option<String>,

    /// Site linked from the extended message format
    pub site_url: String,
}

/// The two required secrets, resolved for a single request.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub secret: &'a str,
    pub target_url: &'a str,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            secret: non_empty_var("SECRET"),

            target_url: non_empty_var("TARGET_URL"),

            site_url: non_empty_var("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
        }
    }

    /// Build a configuration with both secrets set and defaults elsewhere.
    pub fn new(secret: impl Into<String>, target_url: impl Into<String>) -> Self {
        Config {
            port: 8080,
            secret: Some(secret.into()),
            target_url: Some(target_url.into()),
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }

    /// Resolve the signing secret and destination URL.
    ///
    /// Either one missing (or empty) is a configuration error for the request.
    pub fn credentials(&self) -> Result<Credentials<'_>, RelayError> {
        let secret = self.secret.as_deref().filter(|s| !s.is_empty());
        let target_url = self.target_url.as_deref().filter(|s| !s.is_empty());

        match (secret, target_url) {
            (Some(secret), Some(target_url)) => Ok(Credentials { secret, target_url }),
            _ => Err(RelayError::ConfigurationMissing {
                secret_set: secret.is_some(),
                target_url_set: target_url.is_some(),
            }),
        }
    }
}

/// Read an environment variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

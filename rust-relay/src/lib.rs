//! Deploy Relay - forwards Vercel deployment notifications to Discord.
//!
//! ## Architecture
//!
//! ```text
//! Vercel → /api/webhook → verify signature → build message → Discord webhook
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod forward;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{AuthFailure, RelayError};
pub use event::{build_message, InboundEvent, OutboundMessage};
pub use forward::{ForwardError, Forwarder};
pub use web::{router, AppState};

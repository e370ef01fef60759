//! Deployment event handling.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body → InboundEvent::parse() → build_message() → OutboundMessage
//! ```

pub mod transform;
pub mod types;

pub use transform::{build_message, commit_url, OutboundMessage};
pub use types::{Deployment, DeploymentMeta, EventPayload, InboundEvent};

//! Outbound delivery to the chat webhook.

pub mod discord;

pub use discord::{ForwardError, Forwarder};

//! Advisory assistant client.
//!
//! Takes the shop's low-stock and top-seller data, folds it into a system
//! prompt and asks an OpenRouter-compatible chat-completion endpoint for
//! restocking advice. Requests are timeout-bounded; every failure maps to
//! a typed [`AdvisorError`] the conversation view can render inline.

pub mod client;
pub mod config;
pub mod digest;
mod error;

pub use client::AdvisorClient;
pub use config::AdvisorConfig;
pub use digest::ShopDigest;
pub use error::{AdvisorError, AdvisorResult};

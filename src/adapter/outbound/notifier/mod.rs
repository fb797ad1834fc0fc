//! Notification adapters.
//!
//! Implements the `port::outbound::notifier::Notifier` trait for message
//! transports. The log and no-op notifiers live next to the port.

#[cfg(feature = "telegram")]
pub mod telegram;

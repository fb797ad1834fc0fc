//! Notifier port for per-owner slot notifications.
//!
//! The core hands a fully built message text to a [`Notifier`]; how it
//! reaches the owner (Telegram, logs, ...) is up to the adapter.

use async_trait::async_trait;
use tracing::info;

use crate::domain::OwnerId;
use crate::error::NotifyError;

/// Trait for message transports.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`); the dispatcher
///   sends to different owners concurrently.
/// - No delivery confirmation is expected beyond the returned result, which
///   the dispatcher only logs.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message chunk to `owner`.
    async fn send(&self, owner: OwnerId, text: &str) -> Result<(), NotifyError>;

    /// Largest message the transport accepts, in characters.
    fn max_message_chars(&self) -> usize;
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _owner: OwnerId, _text: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    fn max_message_chars(&self) -> usize {
        usize::MAX
    }
}

/// A logging notifier that writes messages via tracing (dry-run mode).
pub struct LogNotifier {
    max_message_chars: usize,
}

impl LogNotifier {
    #[must_use]
    pub const fn new(max_message_chars: usize) -> Self {
        Self { max_message_chars }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, owner: OwnerId, text: &str) -> Result<(), NotifyError> {
        info!(owner = %owner, chars = text.chars().count(), "Notification");
        for line in text.lines() {
            info!(owner = %owner, "  {line}");
        }
        Ok(())
    }

    fn max_message_chars(&self) -> usize {
        self.max_message_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_notifier_accepts_everything() {
        let notifier = NullNotifier;
        assert!(notifier.send(OwnerId::new(1), "hello").await.is_ok());
        assert_eq!(notifier.max_message_chars(), usize::MAX);
    }

    #[tokio::test]
    async fn log_notifier_reports_its_limit() {
        let notifier = LogNotifier::new(4096);
        assert!(notifier.send(OwnerId::new(1), "a\nb").await.is_ok());
        assert_eq!(notifier.max_message_chars(), 4096);
    }
}

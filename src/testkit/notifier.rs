//! Recording [`Notifier`] for dispatch assertions.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::OwnerId;
use crate::error::NotifyError;
use crate::port::outbound::notifier::Notifier;

/// Thread-safe collector of every chunk sent, in send order.
#[derive(Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(OwnerId, String)>>>,
    max_message_chars: usize,
    failing_owners: Vec<OwnerId>,
}

impl RecordingNotifier {
    pub fn new(max_message_chars: usize) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            max_message_chars,
            failing_owners: Vec::new(),
        }
    }

    /// Make every send to `owner` fail.
    pub fn failing_for(mut self, owner: i64) -> Self {
        self.failing_owners.push(OwnerId::new(owner));
        self
    }

    pub fn sent(&self) -> Vec<(OwnerId, String)> {
        self.sent.lock().clone()
    }

    /// Chunks sent to one owner.
    pub fn sent_to(&self, owner: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(o, _)| o.get() == owner)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, owner: OwnerId, text: &str) -> Result<(), NotifyError> {
        if self.failing_owners.contains(&owner) {
            return Err(NotifyError {
                owner: owner.get(),
                reason: "refused".to_string(),
            });
        }
        self.sent.lock().push((owner, text.to_string()));
        Ok(())
    }

    fn max_message_chars(&self) -> usize {
        self.max_message_chars
    }
}

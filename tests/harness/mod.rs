//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod temp_db;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use slotwatch::adapter::outbound::memory::MemorySubscriptionStore;
use slotwatch::application::{Poller, PollerConfig, SnapshotCache};
use slotwatch::domain::Subscription;
use slotwatch::testkit::domain::today;
use slotwatch::testkit::notifier::RecordingNotifier;
use slotwatch::testkit::provider::ScriptedFetcher;

/// Noon UTC on the fixed test date.
pub fn now() -> DateTime<Utc> {
    today()
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
        .and_utc()
}

/// A poller over in-memory collaborators.
pub struct PollerFixture {
    pub poller: Poller,
    pub notifier: RecordingNotifier,
    pub cache: Arc<SnapshotCache>,
}

impl PollerFixture {
    pub fn new(fetcher: ScriptedFetcher, subscriptions: Vec<Subscription>) -> Self {
        Self::with_config(fetcher, subscriptions, RecordingNotifier::new(4096), PollerConfig::default())
    }

    pub fn with_config(
        fetcher: ScriptedFetcher,
        subscriptions: Vec<Subscription>,
        notifier: RecordingNotifier,
        config: PollerConfig,
    ) -> Self {
        let cache = Arc::new(SnapshotCache::new());
        let poller = Poller::new(
            Arc::new(fetcher),
            Arc::new(MemorySubscriptionStore::with_subscriptions(subscriptions)),
            Arc::new(notifier.clone()),
            cache.clone(),
            config,
        );
        Self {
            poller,
            notifier,
            cache,
        }
    }
}

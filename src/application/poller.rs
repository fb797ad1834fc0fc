//! The poll loop: fetch, match, diff, dispatch, sleep.
//!
//! Cycles never overlap. The previous result set lives in an explicit
//! [`PollerState`] threaded through [`Poller::run_cycle`] and is only
//! replaced after a successful fetch whose dispatch has finished.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::dispatch::{group_by_owner, DispatchReport, Dispatcher};
use super::snapshot::SnapshotCache;
use crate::domain::{dedupe, diff, find_matches, sort_for_presentation, MatchResult};
use crate::error::{FetchError, StoreError};
use crate::port::outbound::notifier::Notifier;
use crate::port::outbound::provider::SnapshotFetcher;
use crate::port::outbound::store::SubscriptionStore;

/// Timing and aggregation settings for the loop.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Sleep after a successful cycle.
    pub interval: Duration,
    /// Sleep after a failed fetch.
    pub retry_delay: Duration,
    /// Collapse identical (owner, record) pairs within one cycle.
    pub dedupe_within_cycle: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            retry_delay: Duration::from_secs(10),
            dedupe_within_cycle: true,
        }
    }
}

/// State carried from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerState {
    previous: Vec<MatchResult>,
    cycles: u64,
}

impl PollerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches of the last successful cycle.
    #[must_use]
    pub fn previous(&self) -> &[MatchResult] {
        &self.previous
    }

    /// Number of successful cycles so far.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// What a single cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    Completed {
        /// Size of the aggregated result set.
        matches: usize,
        /// Entries absent from the previous cycle.
        new: Vec<MatchResult>,
        /// Subscriptions skipped as malformed.
        skipped: usize,
        report: DispatchReport,
    },
    FetchFailed(FetchError),
    StoreFailed(StoreError),
}

impl CycleOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Drives the poll loop.
pub struct Poller {
    fetcher: Arc<dyn SnapshotFetcher>,
    store: Arc<dyn SubscriptionStore>,
    dispatcher: Dispatcher,
    cache: Arc<SnapshotCache>,
    config: PollerConfig,
}

impl Poller {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn SnapshotFetcher>,
        store: Arc<dyn SubscriptionStore>,
        notifier: Arc<dyn Notifier>,
        cache: Arc<SnapshotCache>,
        config: PollerConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            dispatcher: Dispatcher::new(notifier),
            cache,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Run one fetch-match-diff-dispatch pass.
    ///
    /// `now` is read once by the caller so every comparison in the cycle
    /// sees the same date. On failure `state` is left untouched.
    pub async fn run_cycle(&self, state: &mut PollerState, now: DateTime<Utc>) -> CycleOutcome {
        let records = match self.fetcher.fetch_coefficients().await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    provider = self.fetcher.provider_name(),
                    error = %e,
                    "Fetch failed, keeping previous results"
                );
                return CycleOutcome::FetchFailed(e);
            }
        };
        debug!(records = records.len(), "Snapshot fetched");

        let subscriptions = match self.store.list_active_subscriptions() {
            Ok(subscriptions) => subscriptions,
            Err(e) => {
                warn!(error = %e, "Failed to load subscriptions, skipping cycle");
                return CycleOutcome::StoreFailed(e);
            }
        };

        let today = now.date_naive();
        let mut current = Vec::new();
        let mut skipped = 0;
        for subscription in &subscriptions {
            if let Err(e) = subscription.validate() {
                warn!(owner = %subscription.owner, error = %e, "Skipping malformed subscription");
                skipped += 1;
                continue;
            }
            current.extend(
                find_matches(subscription, &records, today)
                    .into_iter()
                    .map(|record| MatchResult::new(subscription.owner, record.clone())),
            );
        }

        if self.config.dedupe_within_cycle {
            current = dedupe(current);
        }
        sort_for_presentation(&mut current);

        let new = diff(&current, &state.previous);
        let report = if new.is_empty() {
            DispatchReport::default()
        } else {
            self.dispatcher.dispatch(group_by_owner(&new)).await
        };

        self.cache.replace(records, now);

        info!(
            subscriptions = subscriptions.len(),
            skipped,
            matches = current.len(),
            new = new.len(),
            delivered = report.delivered,
            failed = report.failed,
            "Cycle complete"
        );

        let matches = current.len();
        state.previous = current;
        state.cycles += 1;

        CycleOutcome::Completed {
            matches,
            new,
            skipped,
            report,
        }
    }

    /// Loop until `shutdown` turns `true` or its sender is dropped.
    ///
    /// Returns the final state.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> PollerState {
        let mut state = PollerState::new();
        info!(
            provider = self.fetcher.provider_name(),
            interval_secs = self.config.interval.as_secs(),
            "Poller started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let outcome = self.run_cycle(&mut state, Utc::now()).await;
            let delay = if outcome.is_completed() {
                self.config.interval
            } else {
                self.config.retry_delay
            };

            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                () = tokio::time::sleep(delay) => {}
            }
        }

        info!(cycles = state.cycles, "Poller stopped");
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OwnerId, Subscription, Warehouse, WarehouseId, WarehouseKind};
    use crate::port::outbound::notifier::NullNotifier;
    use crate::port::outbound::store::StoredSubscription;
    use crate::testkit::domain::{record, today};
    use crate::testkit::provider::ScriptedFetcher;

    struct BrokenStore;

    impl SubscriptionStore for BrokenStore {
        fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
            Err(StoreError::Connection("database is locked".into()))
        }
        fn resolve_warehouse_id(&self, name: &str) -> Result<WarehouseId, StoreError> {
            Err(StoreError::NotFound { name: name.into() })
        }
        fn add_subscription(&self, _: &Subscription) -> Result<i64, StoreError> {
            Err(StoreError::Connection("database is locked".into()))
        }
        fn remove_subscriptions(&self, _: OwnerId, _: Option<&str>) -> Result<usize, StoreError> {
            Ok(0)
        }
        fn list_subscriptions(&self, _: OwnerId) -> Result<Vec<StoredSubscription>, StoreError> {
            Ok(Vec::new())
        }
        fn replace_warehouses(&self, _: &[Warehouse]) -> Result<(), StoreError> {
            Ok(())
        }
        fn list_warehouses(&self, _: Option<WarehouseKind>) -> Result<Vec<Warehouse>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn noon() -> DateTime<Utc> {
        today().and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn default_config_matches_documented_timings() {
        let config = PollerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(15));
        assert_eq!(config.retry_delay, Duration::from_secs(10));
        assert!(config.dedupe_within_cycle);
    }

    #[tokio::test]
    async fn store_failure_skips_the_cycle() {
        let cache = Arc::new(SnapshotCache::new());
        let poller = Poller::new(
            Arc::new(ScriptedFetcher::new().then(vec![record("Тула", 1, 0, "Короба")])),
            Arc::new(BrokenStore),
            Arc::new(NullNotifier),
            cache.clone(),
            PollerConfig::default(),
        );
        let mut state = PollerState::new();

        let outcome = poller.run_cycle(&mut state, noon()).await;

        assert!(matches!(outcome, CycleOutcome::StoreFailed(_)));
        assert!(!outcome.is_completed());
        assert_eq!(state, PollerState::new());
        assert!(cache.is_empty());
    }
}

//! Scripted [`SnapshotFetcher`] for poller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{CoefficientRecord, Warehouse};
use crate::error::FetchError;
use crate::port::outbound::provider::SnapshotFetcher;

/// A provider with pre-loaded snapshot results and a fixed directory.
///
/// Each `fetch_coefficients()` call pops the next queued result; once the
/// queue is empty the last successful snapshot is repeated.
pub struct ScriptedFetcher {
    snapshots: Mutex<VecDeque<Result<Vec<CoefficientRecord>, FetchError>>>,
    last: Mutex<Vec<CoefficientRecord>>,
    directory: Result<Vec<Warehouse>, FetchError>,
    fetch_count: Arc<AtomicU32>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(VecDeque::new()),
            last: Mutex::new(Vec::new()),
            directory: Ok(Vec::new()),
            fetch_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Queue a successful snapshot.
    pub fn then(self, records: Vec<CoefficientRecord>) -> Self {
        self.push(Ok(records))
    }

    /// Queue a failed fetch.
    pub fn then_fail(self, reason: &str) -> Self {
        self.push(Err(FetchError::new(reason)))
    }

    pub fn with_directory(mut self, directory: Vec<Warehouse>) -> Self {
        self.directory = Ok(directory);
        self
    }

    pub fn with_failing_directory(mut self, reason: &str) -> Self {
        self.directory = Err(FetchError::new(reason));
        self
    }

    /// Shared counter of `fetch_coefficients()` calls.
    pub fn fetch_count(&self) -> Arc<AtomicU32> {
        self.fetch_count.clone()
    }

    fn push(self, result: Result<Vec<CoefficientRecord>, FetchError>) -> Self {
        self.snapshots.lock().push_back(result);
        self
    }
}

impl Default for ScriptedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotFetcher for ScriptedFetcher {
    async fn fetch_coefficients(&self) -> Result<Vec<CoefficientRecord>, FetchError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let next = self.snapshots.lock().pop_front();
        let mut last = self.last.lock();
        match next {
            Some(Ok(records)) => {
                *last = records.clone();
                Ok(records)
            }
            Some(Err(e)) => Err(e),
            None => Ok(last.clone()),
        }
    }

    async fn fetch_warehouses(&self) -> Result<Vec<Warehouse>, FetchError> {
        self.directory.clone()
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

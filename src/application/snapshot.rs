//! Latest successful provider snapshot, shared with query surfaces.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::CoefficientRecord;

#[derive(Debug, Clone)]
struct Snapshot {
    records: Arc<Vec<CoefficientRecord>>,
    fetched_at: DateTime<Utc>,
}

/// Holds the most recent snapshot published by the poller.
///
/// Readers get a cheap `Arc` clone; a failed fetch never replaces it.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    inner: RwLock<Option<Snapshot>>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a fresh snapshot.
    pub fn replace(&self, records: Vec<CoefficientRecord>, fetched_at: DateTime<Utc>) {
        *self.inner.write() = Some(Snapshot {
            records: Arc::new(records),
            fetched_at,
        });
    }

    /// Records of the latest snapshot (empty before the first success).
    #[must_use]
    pub fn records(&self) -> Arc<Vec<CoefficientRecord>> {
        self.inner
            .read()
            .as_ref()
            .map_or_else(|| Arc::new(Vec::new()), |s| Arc::clone(&s.records))
    }

    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().as_ref().map(|s| s.fetched_at)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_none()
    }
}

//! One-shot slot search and availability summaries.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::snapshot::SnapshotCache;
use crate::domain::{
    find_matches, CoefficientRecord, OwnerId, Subscription, WarehouseFilter, WarehouseKind,
};

/// Coefficient range for one (box type, warehouse) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub box_type: String,
    pub warehouse: String,
    pub min_coefficient: i32,
    pub max_coefficient: i32,
}

/// Records matching a wildcard subscription, sorted by (warehouse, date).
#[must_use]
pub fn search(
    records: &[CoefficientRecord],
    box_type: &str,
    min_lead_days: i32,
    max_coefficient: i32,
    today: NaiveDate,
) -> Vec<CoefficientRecord> {
    let query = Subscription::new(
        OwnerId::new(0),
        WarehouseFilter::Any,
        box_type,
        max_coefficient,
        min_lead_days,
    );
    let mut found: Vec<CoefficientRecord> = find_matches(&query, records, today)
        .into_iter()
        .cloned()
        .collect();
    found.sort_by(|a, b| {
        a.warehouse_name
            .cmp(&b.warehouse_name)
            .then(a.date.cmp(&b.date))
    });
    found
}

/// Min and max coefficient per (box type, warehouse) over open slots.
///
/// `kind` narrows the summary to warehouses or service centers.
#[must_use]
pub fn availability(
    records: &[CoefficientRecord],
    kind: Option<WarehouseKind>,
) -> Vec<Availability> {
    let mut ranges: BTreeMap<(&str, &str), (i32, i32)> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.is_closed()) {
        if kind.is_some_and(|k| WarehouseKind::of(&record.warehouse_name) != k) {
            continue;
        }
        ranges
            .entry((&record.box_type_name, &record.warehouse_name))
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(record.coefficient);
                *hi = (*hi).max(record.coefficient);
            })
            .or_insert((record.coefficient, record.coefficient));
    }

    ranges
        .into_iter()
        .map(|((box_type, warehouse), (lo, hi))| Availability {
            box_type: box_type.to_string(),
            warehouse: warehouse.to_string(),
            min_coefficient: lo,
            max_coefficient: hi,
        })
        .collect()
}

/// Query front-end over the shared [`SnapshotCache`].
#[derive(Clone)]
pub struct SlotQueries {
    cache: Arc<SnapshotCache>,
}

impl SlotQueries {
    #[must_use]
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }

    /// `None` until the poller has published a snapshot.
    #[must_use]
    pub fn search(
        &self,
        box_type: &str,
        min_lead_days: i32,
        max_coefficient: i32,
        today: NaiveDate,
    ) -> Option<Vec<CoefficientRecord>> {
        if self.cache.is_empty() {
            return None;
        }
        let records = self.cache.records();
        Some(search(&records, box_type, min_lead_days, max_coefficient, today))
    }

    #[must_use]
    pub fn availability(&self, kind: Option<WarehouseKind>) -> Option<Vec<Availability>> {
        if self.cache.is_empty() {
            return None;
        }
        Some(availability(&self.cache.records(), kind))
    }
}

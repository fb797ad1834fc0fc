//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`CoefficientRecord`],
//! [`Warehouse`] and [`Subscription`] so tests focus on assertions
//! rather than construction boilerplate.

use chrono::{Duration, NaiveDate};

use crate::domain::{
    CoefficientRecord, OwnerId, Subscription, Warehouse, WarehouseFilter, WarehouseId,
};

/// Fixed "today" for date arithmetic in tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
}

/// `today() + days`.
pub fn day(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// A record `days` after [`today`].
pub fn record(warehouse: &str, days: i64, coefficient: i32, box_type: &str) -> CoefficientRecord {
    CoefficientRecord::new(warehouse, day(days), coefficient, box_type)
}

/// A directory entry.
pub fn warehouse(id: i64, name: &str) -> Warehouse {
    Warehouse::new(WarehouseId::new(id), name)
}

/// A single-warehouse subscription.
pub fn subscription(
    owner: i64,
    warehouse: &str,
    box_type: &str,
    max_coefficient: i32,
    min_lead_days: i32,
) -> Subscription {
    Subscription::new(
        OwnerId::new(owner),
        WarehouseFilter::name(warehouse),
        box_type,
        max_coefficient,
        min_lead_days,
    )
}

/// A subscription that accepts every warehouse.
pub fn wildcard(owner: i64, box_type: &str, max_coefficient: i32, min_lead_days: i32) -> Subscription {
    Subscription::new(
        OwnerId::new(owner),
        WarehouseFilter::Any,
        box_type,
        max_coefficient,
        min_lead_days,
    )
}

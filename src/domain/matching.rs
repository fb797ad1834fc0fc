//! Subscription matching.
//!
//! A record satisfies a subscription when all of the following hold:
//!
//! 1. the warehouse is open (`coefficient != -1`)
//! 2. the box type is one the subscription accepts
//! 3. the warehouse passes the subscription's warehouse filter
//! 4. `coefficient <= max_coefficient`
//! 5. the slot date is at least `min_lead_days` after `today`
//!
//! `today` is the provider's reference calendar date (UTC) and is read once
//! per cycle by the caller so every comparison in a cycle agrees.

use chrono::NaiveDate;

use super::id::OwnerId;
use super::slot::CoefficientRecord;
use super::subscription::Subscription;

/// A record confirmed to satisfy one of `owner`'s subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchResult {
    pub owner: OwnerId,
    pub record: CoefficientRecord,
}

impl MatchResult {
    #[must_use]
    pub fn new(owner: OwnerId, record: CoefficientRecord) -> Self {
        Self { owner, record }
    }
}

/// Whole days from `today` until the slot date (negative for past slots).
#[must_use]
pub fn lead_days(record: &CoefficientRecord, today: NaiveDate) -> i64 {
    (record.date - today).num_days()
}

/// Decide whether `record` satisfies `subscription` as of `today`.
#[must_use]
pub fn matches(subscription: &Subscription, record: &CoefficientRecord, today: NaiveDate) -> bool {
    !record.is_closed()
        && subscription.box_types.contains(&record.box_type_name)
        && subscription.warehouses.accepts(&record.warehouse_name)
        && record.coefficient <= subscription.max_coefficient
        && lead_days(record, today) >= i64::from(subscription.min_lead_days)
}

/// Every record satisfying `subscription`, in provider order.
#[must_use]
pub fn find_matches<'a>(
    subscription: &Subscription,
    records: &'a [CoefficientRecord],
    today: NaiveDate,
) -> Vec<&'a CoefficientRecord> {
    records
        .iter()
        .filter(|record| matches(subscription, record, today))
        .collect()
}

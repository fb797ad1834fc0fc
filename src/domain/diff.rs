//! Change detection between successive poll cycles.
//!
//! An entry of the current result set is new iff no entry of the previous
//! set is equal to it. Multiplicity in `current` is preserved: [`diff`] never
//! dedupes. Collapsing identical pairs is a separate, explicit step
//! ([`dedupe`]) applied while aggregating a cycle.

use std::collections::HashSet;

use super::matching::MatchResult;

/// Entries of `current` absent from `previous`, in `current` order.
#[must_use]
pub fn diff(current: &[MatchResult], previous: &[MatchResult]) -> Vec<MatchResult> {
    let seen: HashSet<&MatchResult> = previous.iter().collect();
    current
        .iter()
        .filter(|entry| !seen.contains(entry))
        .cloned()
        .collect()
}

/// Sort into presentation order: owner, warehouse, date.
///
/// Box type and coefficient break the remaining ties so output is stable
/// across cycles regardless of provider order.
pub fn sort_for_presentation(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        a.owner
            .cmp(&b.owner)
            .then_with(|| a.record.warehouse_name.cmp(&b.record.warehouse_name))
            .then_with(|| a.record.date.cmp(&b.record.date))
            .then_with(|| a.record.box_type_name.cmp(&b.record.box_type_name))
            .then_with(|| a.record.coefficient.cmp(&b.record.coefficient))
    });
}

/// Drop repeated (owner, record) pairs, keeping the first occurrence.
#[must_use]
pub fn dedupe(results: Vec<MatchResult>) -> Vec<MatchResult> {
    let mut seen = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

//! Per-owner message building and delivery.
//!
//! New matches are folded into one message per owner, one line per match,
//! in the order the change detector produced them. Messages longer than the
//! transport limit are cut into fixed-size chunks on character boundaries.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::{CoefficientRecord, MatchResult, OwnerId};
use crate::port::outbound::notifier::Notifier;

/// Date format used in notification lines.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Render one record as a notification line.
///
/// Field order is fixed: warehouse, date, coefficient, type.
#[must_use]
pub fn format_line(record: &CoefficientRecord) -> String {
    format!(
        "Warehouse: {}, date: {}, coefficient: {}, type: {}.",
        record.warehouse_name,
        record.date.format(DATE_FORMAT),
        record.coefficient,
        record.box_type_name,
    )
}

/// Fold matches into one message text per owner.
#[must_use]
pub fn group_by_owner(matches: &[MatchResult]) -> BTreeMap<OwnerId, String> {
    let mut messages: BTreeMap<OwnerId, String> = BTreeMap::new();
    for result in matches {
        let text = messages.entry(result.owner).or_default();
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&format_line(&result.record));
    }
    messages
}

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Splits never fall inside a multi-byte character. Concatenating the
/// chunks yields `text` exactly.
#[must_use]
pub fn chunk_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let max_chars = max_chars.max(1);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    chunks.push(current);
    chunks
}

/// Outcome of one dispatch round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Owners whose every chunk was accepted by the transport.
    pub delivered: usize,
    /// Owners for whom at least one chunk failed.
    pub failed: usize,
}

/// Sends grouped messages through a [`Notifier`].
#[derive(Clone)]
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Deliver every owner's message and wait for all sends to finish.
    ///
    /// Owners are served concurrently; chunks for one owner go out in order.
    /// Failures are logged and counted, never propagated.
    pub async fn dispatch(&self, messages: BTreeMap<OwnerId, String>) -> DispatchReport {
        let limit = self.notifier.max_message_chars();
        let sends = messages.into_iter().map(|(owner, text)| {
            let notifier = Arc::clone(&self.notifier);
            async move {
                for chunk in chunk_message(&text, limit) {
                    if let Err(e) = notifier.send(owner, &chunk).await {
                        warn!(owner = %owner, error = %e, "Failed to deliver notification");
                        return false;
                    }
                }
                debug!(owner = %owner, "Notification delivered");
                true
            }
        });

        join_all(sends)
            .await
            .into_iter()
            .fold(DispatchReport::default(), |mut report, ok| {
                if ok {
                    report.delivered += 1;
                } else {
                    report.failed += 1;
                }
                report
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(name: &str, day: u32, coefficient: i32) -> CoefficientRecord {
        CoefficientRecord::new(
            name,
            NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            coefficient,
            "Короба",
        )
    }

    #[test]
    fn line_keeps_field_order() {
        assert_eq!(
            format_line(&record("Казань", 29, 2)),
            "Warehouse: Казань, date: 29.10.2026, coefficient: 2, type: Короба."
        );
    }

    #[test]
    fn grouping_preserves_order_within_owner() {
        let one = OwnerId::new(1);
        let two = OwnerId::new(2);
        let matches = vec![
            MatchResult::new(one, record("Тула", 21, 0)),
            MatchResult::new(two, record("Казань", 22, 1)),
            MatchResult::new(one, record("Коледино", 20, 3)),
        ];

        let grouped = group_by_owner(&matches);
        assert_eq!(grouped.len(), 2);
        let lines: Vec<&str> = grouped[&one].lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Тула"));
        assert!(lines[1].contains("Коледино"));
    }

    #[test]
    fn chunking_splits_on_codepoints() {
        let text = "ябвгд".repeat(3);
        let chunks = chunk_message(&text, 4);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_message("hello", 4096), vec!["hello".to_string()]);
        assert!(chunk_message("", 10).is_empty());
    }

    #[test]
    fn oversized_owner_message_becomes_two_chunks() {
        let line = "x".repeat(39);
        let text = vec![line; 130].join("\n");
        assert_eq!(text.chars().count(), 130 * 40 - 1);

        let chunks = chunk_message(&text, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 4096);
        assert_eq!(chunks.concat(), text);
    }
}

//! Plain-text rendering of command responses.

use crate::application::dispatch::format_line;
use crate::application::Availability;
use crate::domain::{CoefficientRecord, Warehouse};
use crate::port::outbound::store::StoredSubscription;

pub fn format_subscription(stored: &StoredSubscription) -> String {
    let sub = &stored.subscription;
    let box_types: Vec<&str> = sub.box_types.iter().map(String::as_str).collect();
    format!(
        "#{} {}: {}, coefficient ≤ {}, at least {} day(s) ahead",
        stored.id,
        sub.warehouses,
        box_types.join(", "),
        sub.max_coefficient,
        sub.min_lead_days,
    )
}

pub fn format_subscriptions(subscriptions: &[StoredSubscription]) -> String {
    if subscriptions.is_empty() {
        return "You have no subscriptions. Add one with /watch.".to_string();
    }
    let lines: Vec<String> = subscriptions.iter().map(format_subscription).collect();
    format!("🔔 Subscriptions\n\n{}", lines.join("\n"))
}

pub fn format_search(records: &[CoefficientRecord]) -> String {
    if records.is_empty() {
        return "No matching slots right now.".to_string();
    }
    let lines: Vec<String> = records.iter().map(format_line).collect();
    format!("🔎 {} slot(s)\n\n{}", records.len(), lines.join("\n"))
}

pub fn format_availability(ranges: &[Availability]) -> String {
    if ranges.is_empty() {
        return "No open slots in the latest snapshot.".to_string();
    }

    let mut out = String::from("📊 Coefficients");
    let mut current_box: Option<&str> = None;
    for range in ranges {
        if current_box != Some(range.box_type.as_str()) {
            out.push_str(&format!("\n\n{}:", range.box_type));
            current_box = Some(&range.box_type);
        }
        if range.min_coefficient == range.max_coefficient {
            out.push_str(&format!("\n{}: {}", range.warehouse, range.min_coefficient));
        } else {
            out.push_str(&format!(
                "\n{}: {}..{}",
                range.warehouse, range.min_coefficient, range.max_coefficient
            ));
        }
    }
    out
}

pub fn format_warehouses(warehouses: &[Warehouse]) -> String {
    if warehouses.is_empty() {
        return "The warehouse directory is empty.".to_string();
    }
    let names: Vec<&str> = warehouses.iter().map(|w| w.name.as_str()).collect();
    format!("🏭 {} entries\n\n{}", warehouses.len(), names.join("\n"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{OwnerId, Subscription, WarehouseFilter, WarehouseId};

    #[test]
    fn subscription_line() {
        let stored = StoredSubscription {
            id: 4,
            subscription: Subscription::new(
                OwnerId::new(1),
                WarehouseFilter::name("Казань"),
                "Короба",
                3,
                7,
            ),
        };
        assert_eq!(
            format_subscription(&stored),
            "#4 Казань: Короба, coefficient ≤ 3, at least 7 day(s) ahead"
        );
        assert!(format_subscriptions(&[]).contains("/watch"));
    }

    #[test]
    fn search_lists_records() {
        let record = CoefficientRecord::new(
            "Тула",
            NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
            1,
            "Короба",
        );
        let text = format_search(&[record]);
        assert!(text.starts_with("🔎 1 slot(s)"));
        assert!(text.contains("date: 30.10.2026"));
    }

    #[test]
    fn availability_groups_by_box_type() {
        let ranges = vec![
            Availability {
                box_type: "Короба".to_string(),
                warehouse: "Казань".to_string(),
                min_coefficient: 0,
                max_coefficient: 2,
            },
            Availability {
                box_type: "Короба".to_string(),
                warehouse: "Тула".to_string(),
                min_coefficient: 1,
                max_coefficient: 1,
            },
        ];
        let text = format_availability(&ranges);
        assert_eq!(text, "📊 Coefficients\n\nКороба:\nКазань: 0..2\nТула: 1");
    }

    #[test]
    fn warehouse_listing() {
        let text = format_warehouses(&[Warehouse::new(WarehouseId::new(1), "Тула")]);
        assert!(text.ends_with("Тула"));
    }
}

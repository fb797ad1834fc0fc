//! Telegram command execution against the application services.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::command::{command_help, TelegramCommand};
use super::format::{
    format_availability, format_search, format_subscription, format_subscriptions,
    format_warehouses,
};
use crate::application::{SlotQueries, SubscriptionRequest, SubscriptionService};
use crate::domain::OwnerId;
use crate::error::SubscriptionError;

const NO_SNAPSHOT: &str = "No snapshot yet, try again in a few seconds.";

/// Executes parsed commands on behalf of a chat.
#[derive(Clone)]
pub struct TelegramControl {
    subscriptions: Arc<SubscriptionService>,
    queries: SlotQueries,
}

impl TelegramControl {
    #[must_use]
    pub fn new(subscriptions: Arc<SubscriptionService>, queries: SlotQueries) -> Self {
        Self {
            subscriptions,
            queries,
        }
    }

    /// Execute one parsed command for `owner` and return response text.
    ///
    /// `today` anchors lead-time checks for `/find`.
    #[must_use]
    pub fn execute(&self, owner: OwnerId, command: TelegramCommand, today: NaiveDate) -> String {
        match command {
            TelegramCommand::Start | TelegramCommand::Help => command_help().to_string(),
            TelegramCommand::Watch {
                warehouse,
                max_coefficient,
                min_lead_days,
                box_type,
            } => self.watch_text(SubscriptionRequest {
                owner,
                warehouse,
                max_coefficient,
                min_lead_days,
                box_type,
            }),
            TelegramCommand::Unwatch { warehouse } => {
                match self.subscriptions.remove(owner, &warehouse) {
                    Ok(0) => format!("Nothing to remove for {warehouse}."),
                    Ok(n) => format!("🔕 Removed {n} subscription(s)."),
                    Err(e) => self.failure_text(owner, &e),
                }
            }
            TelegramCommand::List => match self.subscriptions.list(owner) {
                Ok(list) => format_subscriptions(&list),
                Err(e) => self.failure_text(owner, &e),
            },
            TelegramCommand::Find {
                box_type,
                min_lead_days,
                max_coefficient,
            } => {
                let box_type = match self.subscriptions.canonical_box_type(&box_type) {
                    Ok(canonical) => canonical,
                    Err(e) => return format!("❌ {e}"),
                };
                self.queries
                    .search(&box_type, min_lead_days, max_coefficient, today)
                    .map_or_else(|| NO_SNAPSHOT.to_string(), |found| format_search(&found))
            }
            TelegramCommand::Warehouses(kind) => match self.subscriptions.warehouses(Some(kind)) {
                Ok(list) => format_warehouses(&list),
                Err(e) => self.failure_text(owner, &e),
            },
            TelegramCommand::Available(kind) => self
                .queries
                .availability(Some(kind))
                .map_or_else(|| NO_SNAPSHOT.to_string(), |ranges| format_availability(&ranges)),
        }
    }

    fn watch_text(&self, request: SubscriptionRequest) -> String {
        match self.subscriptions.add(&request) {
            Ok(stored) => format!("🔔 Subscribed: {}", format_subscription(&stored)),
            Err(SubscriptionError::Store(e)) => self.failure_text(request.owner, &e),
            Err(e) => format!("❌ {e}"),
        }
    }

    fn failure_text(&self, owner: OwnerId, err: &dyn std::error::Error) -> String {
        warn!(owner = %owner, error = %err, "Telegram command failed");
        "⚠️ Something went wrong, please try again later.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::adapter::outbound::memory::MemorySubscriptionStore;
    use crate::adapter::outbound::similarity::LevenshteinMatcher;
    use crate::application::{SnapshotCache, SubscriptionRules};
    use crate::domain::{CoefficientRecord, Warehouse, WarehouseId, WarehouseKind};
    use crate::port::outbound::store::SubscriptionStore;

    fn control() -> (TelegramControl, Arc<SnapshotCache>) {
        let store = Arc::new(MemorySubscriptionStore::new());
        store
            .replace_warehouses(&[
                Warehouse::new(WarehouseId::new(1), "Казань"),
                Warehouse::new(WarehouseId::new(2), "СЦ Абакан"),
            ])
            .unwrap();
        let service = Arc::new(SubscriptionService::new(
            store,
            Arc::new(LevenshteinMatcher::new()),
            SubscriptionRules::default(),
        ));
        let cache = Arc::new(SnapshotCache::new());
        (
            TelegramControl::new(service, SlotQueries::new(Arc::clone(&cache))),
            cache,
        )
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[test]
    fn watch_list_unwatch_cycle() {
        let (control, _) = control();
        let owner = OwnerId::new(5);

        let reply = control.execute(
            owner,
            TelegramCommand::Watch {
                warehouse: "казань".to_string(),
                max_coefficient: 3,
                min_lead_days: 7,
                box_type: "Короба".to_string(),
            },
            today(),
        );
        assert!(reply.starts_with("🔔 Subscribed"), "{reply}");

        let listed = control.execute(owner, TelegramCommand::List, today());
        assert!(listed.contains("Казань: Короба"));

        let removed = control.execute(
            owner,
            TelegramCommand::Unwatch {
                warehouse: "Казань".to_string(),
            },
            today(),
        );
        assert!(removed.contains("Removed 1"));
    }

    #[test]
    fn watch_rejection_is_shown() {
        let (control, _) = control();
        let reply = control.execute(
            OwnerId::new(5),
            TelegramCommand::Watch {
                warehouse: "*".to_string(),
                max_coefficient: 50,
                min_lead_days: 1,
                box_type: "Короба".to_string(),
            },
            today(),
        );
        assert!(reply.starts_with("❌"));
    }

    #[test]
    fn find_waits_for_snapshot() {
        let (control, cache) = control();
        let find = TelegramCommand::Find {
            box_type: "короба".to_string(),
            min_lead_days: 1,
            max_coefficient: 3,
        };
        assert_eq!(control.execute(OwnerId::new(1), find.clone(), today()), NO_SNAPSHOT);

        cache.replace(
            vec![CoefficientRecord::new(
                "Казань",
                today() + Duration::days(3),
                2,
                "Короба",
            )],
            Utc::now(),
        );
        let reply = control.execute(OwnerId::new(1), find, today());
        assert!(reply.starts_with("🔎 1 slot(s)"), "{reply}");
    }

    #[test]
    fn directory_by_kind() {
        let (control, _) = control();
        let reply = control.execute(
            OwnerId::new(1),
            TelegramCommand::Warehouses(WarehouseKind::ServiceCenter),
            today(),
        );
        assert!(reply.contains("СЦ Абакан"));
        assert!(!reply.contains("Казань"));
    }
}

//! SQLite subscription store implementation.
//!
//! List-valued subscription fields are stored as JSON arrays; a NULL
//! `warehouse_names` column is the wildcard filter.

use std::collections::BTreeSet;

use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::warn;

use super::database::connection::DbPool;
use super::database::model::{NewSubscriptionRow, SubscriptionRow, WarehouseRow};
use super::database::schema::{subscriptions, warehouses};
use crate::domain::{OwnerId, Subscription, Warehouse, WarehouseFilter, WarehouseId, WarehouseKind};
use crate::error::StoreError;
use crate::port::outbound::store::{StoredSubscription, SubscriptionStore};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(diesel::QueryableByName)]
struct LastInsertId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    id: i64,
}

/// SQLite-backed subscription store.
pub struct SqliteSubscriptionStore {
    pool: DbPool,
}

impl SqliteSubscriptionStore {
    /// Create a new store over an already migrated connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }

    fn to_row(subscription: &Subscription) -> Result<NewSubscriptionRow, StoreError> {
        let warehouse_names = match &subscription.warehouses {
            WarehouseFilter::Any => None,
            WarehouseFilter::Names(names) => Some(
                serde_json::to_string(names).map_err(|e| StoreError::Parse(e.to_string()))?,
            ),
        };
        Ok(NewSubscriptionRow {
            owner_id: subscription.owner.get(),
            warehouse_names,
            box_types: serde_json::to_string(&subscription.box_types)
                .map_err(|e| StoreError::Parse(e.to_string()))?,
            max_coefficient: subscription.max_coefficient,
            min_lead_days: subscription.min_lead_days,
            created_at: Utc::now().to_rfc3339(),
        })
    }

    fn from_row(row: SubscriptionRow) -> Result<StoredSubscription, StoreError> {
        let warehouses = match row.warehouse_names {
            None => WarehouseFilter::Any,
            Some(raw) => WarehouseFilter::Names(
                serde_json::from_str::<BTreeSet<String>>(&raw)
                    .map_err(|e| StoreError::Parse(e.to_string()))?,
            ),
        };
        let box_types = serde_json::from_str::<BTreeSet<String>>(&row.box_types)
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(StoredSubscription {
            id: row.id,
            subscription: Subscription {
                owner: OwnerId::new(row.owner_id),
                warehouses,
                box_types,
                max_coefficient: row.max_coefficient,
                min_lead_days: row.min_lead_days,
            },
        })
    }

    fn load_owner_rows(conn: &mut Conn, owner: OwnerId) -> Result<Vec<SubscriptionRow>, StoreError> {
        subscriptions::table
            .filter(subscriptions::owner_id.eq(owner.get()))
            .order(subscriptions::id.asc())
            .select(SubscriptionRow::as_select())
            .load(conn)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl SubscriptionStore for SqliteSubscriptionStore {
    fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        let mut conn = self.conn()?;
        let rows: Vec<SubscriptionRow> = subscriptions::table
            .order(subscriptions::id.asc())
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        // One unreadable row must not hide every other owner's subscriptions.
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match Self::from_row(row) {
                    Ok(stored) => Some(stored.subscription),
                    Err(error) => {
                        warn!(id, error = %error, "Skipping unreadable subscription");
                        None
                    }
                }
            })
            .collect())
    }

    fn resolve_warehouse_id(&self, name: &str) -> Result<WarehouseId, StoreError> {
        let mut conn = self.conn()?;
        let id: Option<i64> = warehouses::table
            .filter(warehouses::name.eq(name))
            .select(warehouses::id)
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        id.map(WarehouseId::new).ok_or_else(|| StoreError::NotFound {
            name: name.to_string(),
        })
    }

    fn add_subscription(&self, subscription: &Subscription) -> Result<i64, StoreError> {
        let row = Self::to_row(subscription)?;
        let mut conn = self.conn()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(subscriptions::table)
                .values(&row)
                .execute(conn)?;
            let last: LastInsertId =
                diesel::sql_query("SELECT last_insert_rowid() AS id").get_result(conn)?;
            Ok(last.id)
        })
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn remove_subscriptions(
        &self,
        owner: OwnerId,
        warehouse: Option<&str>,
    ) -> Result<usize, StoreError> {
        let mut conn = self.conn()?;
        let rows = Self::load_owner_rows(&mut conn, owner)?;

        let mut doomed = Vec::new();
        for row in rows {
            let id = row.id;
            let stored = Self::from_row(row)?;
            let hit = match (&stored.subscription.warehouses, warehouse) {
                (WarehouseFilter::Any, None) => true,
                (WarehouseFilter::Names(names), Some(name)) => names.contains(name),
                _ => false,
            };
            if hit {
                doomed.push(id);
            }
        }

        if doomed.is_empty() {
            return Ok(0);
        }

        diesel::delete(subscriptions::table.filter(subscriptions::id.eq_any(doomed)))
            .execute(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn list_subscriptions(&self, owner: OwnerId) -> Result<Vec<StoredSubscription>, StoreError> {
        let mut conn = self.conn()?;
        Self::load_owner_rows(&mut conn, owner)?
            .into_iter()
            .map(Self::from_row)
            .collect()
    }

    fn replace_warehouses(&self, directory: &[Warehouse]) -> Result<(), StoreError> {
        let rows: Vec<WarehouseRow> = directory
            .iter()
            .map(|w| WarehouseRow {
                id: w.id.get(),
                name: w.name.clone(),
            })
            .collect();
        let mut conn = self.conn()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(warehouses::table).execute(conn)?;
            for row in &rows {
                diesel::replace_into(warehouses::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn list_warehouses(&self, kind: Option<WarehouseKind>) -> Result<Vec<Warehouse>, StoreError> {
        let mut conn = self.conn()?;
        let rows: Vec<WarehouseRow> = warehouses::table
            .order(warehouses::name.asc())
            .select(WarehouseRow::as_select())
            .load(&mut conn)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| Warehouse::new(WarehouseId::new(row.id), row.name))
            .filter(|w| kind.map_or(true, |k| w.kind() == k))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::open;

    fn store() -> SqliteSubscriptionStore {
        SqliteSubscriptionStore::new(open(":memory:").unwrap())
    }

    fn kazan(owner: i64) -> Subscription {
        Subscription::new(OwnerId::new(owner), WarehouseFilter::name("Казань"), "Короба", 3, 7)
    }

    #[test]
    fn add_then_list_round_trips_fields() {
        let store = store();
        let wildcard = Subscription::new(OwnerId::new(1), WarehouseFilter::Any, "Короба", 0, 2)
            .with_box_type("Монопаллеты");

        let first = store.add_subscription(&kazan(1)).unwrap();
        let second = store.add_subscription(&wildcard).unwrap();
        assert!(second > first);

        let listed = store.list_subscriptions(OwnerId::new(1)).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first);
        assert_eq!(listed[0].subscription, kazan(1));
        assert_eq!(listed[1].subscription, wildcard);
    }

    #[test]
    fn active_subscriptions_span_owners() {
        let store = store();
        store.add_subscription(&kazan(1)).unwrap();
        store.add_subscription(&kazan(2)).unwrap();

        let active = store.list_active_subscriptions().unwrap();
        assert_eq!(active.len(), 2);
        assert!(store.list_subscriptions(OwnerId::new(3)).unwrap().is_empty());
    }

    #[test]
    fn unreadable_row_is_skipped_in_active_listing() {
        let store = store();
        store
            .add_subscription(&Subscription::new(OwnerId::new(1), WarehouseFilter::Any, "Короба", 2, 0))
            .unwrap();
        let mut conn = store.conn().unwrap();
        diesel::sql_query(
            "INSERT INTO subscriptions (owner_id, warehouse_names, box_types, max_coefficient, min_lead_days, created_at) \
             VALUES (2, NULL, 'not json', 1, 0, '2024-06-01T00:00:00Z')",
        )
        .execute(&mut conn)
        .unwrap();
        drop(conn);

        let active = store.list_active_subscriptions().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].owner, OwnerId::new(1));
    }

    #[test]
    fn remove_only_touches_matching_owner_and_warehouse() {
        let store = store();
        store.add_subscription(&kazan(1)).unwrap();
        store.add_subscription(&kazan(2)).unwrap();
        store
            .add_subscription(&Subscription::new(
                OwnerId::new(1),
                WarehouseFilter::Any,
                "Короба",
                1,
                1,
            ))
            .unwrap();

        assert_eq!(store.remove_subscriptions(OwnerId::new(1), Some("Тула")).unwrap(), 0);
        assert_eq!(store.remove_subscriptions(OwnerId::new(1), Some("Казань")).unwrap(), 1);
        assert_eq!(store.remove_subscriptions(OwnerId::new(1), None).unwrap(), 1);
        assert!(store.list_subscriptions(OwnerId::new(1)).unwrap().is_empty());
        assert_eq!(store.list_subscriptions(OwnerId::new(2)).unwrap().len(), 1);
    }

    #[test]
    fn warehouse_directory_is_replaced_wholesale() {
        let store = store();
        store
            .replace_warehouses(&[
                Warehouse::new(WarehouseId::new(1), "Тула"),
                Warehouse::new(WarehouseId::new(2), "СЦ Абакан"),
            ])
            .unwrap();
        store
            .replace_warehouses(&[
                Warehouse::new(WarehouseId::new(3), "Казань"),
                Warehouse::new(WarehouseId::new(4), "СЦ Вёшки"),
            ])
            .unwrap();

        assert_eq!(store.resolve_warehouse_id("Казань").unwrap(), WarehouseId::new(3));
        assert!(matches!(
            store.resolve_warehouse_id("Тула"),
            Err(StoreError::NotFound { .. })
        ));

        let centers = store.list_warehouses(Some(WarehouseKind::ServiceCenter)).unwrap();
        assert_eq!(centers, vec![Warehouse::new(WarehouseId::new(4), "СЦ Вёшки")]);
        assert_eq!(store.list_warehouses(None).unwrap().len(), 2);
    }
}

//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{subscriptions, warehouses};

/// Database row for a subscription (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriptionRow {
    pub id: i64,
    pub owner_id: i64,
    pub warehouse_names: Option<String>,
    pub box_types: String,
    pub max_coefficient: i32,
    pub min_lead_days: i32,
    pub created_at: String,
}

/// Database row for a subscription (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = subscriptions)]
pub struct NewSubscriptionRow {
    pub owner_id: i64,
    pub warehouse_names: Option<String>,
    pub box_types: String,
    pub max_coefficient: i32,
    pub min_lead_days: i32,
    pub created_at: String,
}

/// Database row for a warehouse directory entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = warehouses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WarehouseRow {
    pub id: i64,
    pub name: String,
}

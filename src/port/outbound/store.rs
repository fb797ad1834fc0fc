//! Subscription persistence port.
//!
//! Calls are synchronous and expected to be fast; the poll loop treats the
//! returned subscriptions as already-validated input but still checks their
//! invariants before matching.

use crate::domain::{OwnerId, Subscription, Warehouse, WarehouseId, WarehouseKind};
use crate::error::StoreError;

/// A persisted subscription together with its storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubscription {
    pub id: i64,
    pub subscription: Subscription,
}

/// Storage operations for subscriptions and the warehouse directory.
pub trait SubscriptionStore: Send + Sync {
    /// Every subscription the poll loop should evaluate.
    fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, StoreError>;

    /// Look up a warehouse ID by exact name.
    ///
    /// Returns [`StoreError::NotFound`] for unknown names.
    fn resolve_warehouse_id(&self, name: &str) -> Result<WarehouseId, StoreError>;

    /// Persist a new subscription. Returns its storage key.
    fn add_subscription(&self, subscription: &Subscription) -> Result<i64, StoreError>;

    /// Delete `owner`'s subscriptions watching `warehouse` (`None` = the
    /// wildcard subscriptions). Returns the number removed.
    fn remove_subscriptions(
        &self,
        owner: OwnerId,
        warehouse: Option<&str>,
    ) -> Result<usize, StoreError>;

    /// `owner`'s subscriptions, oldest first.
    fn list_subscriptions(&self, owner: OwnerId) -> Result<Vec<StoredSubscription>, StoreError>;

    /// Replace the warehouse directory with `warehouses`.
    fn replace_warehouses(&self, warehouses: &[Warehouse]) -> Result<(), StoreError>;

    /// Directory entries sorted by name, optionally restricted to one kind.
    fn list_warehouses(&self, kind: Option<WarehouseKind>) -> Result<Vec<Warehouse>, StoreError>;
}

//! In-process subscription store.
//!
//! Backs tests and callers that need no persistence. Contents are lost on
//! restart.

use parking_lot::RwLock;

use crate::domain::{OwnerId, Subscription, Warehouse, WarehouseFilter, WarehouseId, WarehouseKind};
use crate::error::StoreError;
use crate::port::outbound::store::{StoredSubscription, SubscriptionStore};

#[derive(Default)]
struct Inner {
    next_id: i64,
    subscriptions: Vec<StoredSubscription>,
    warehouses: Vec<Warehouse>,
}

/// Subscription store held entirely in memory.
#[derive(Default)]
pub struct MemorySubscriptionStore {
    inner: RwLock<Inner>,
}

impl MemorySubscriptionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with subscriptions (and optionally a directory).
    #[must_use]
    pub fn with_subscriptions(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let store = Self::new();
        for subscription in subscriptions {
            store.insert(subscription);
        }
        store
    }

    fn insert(&self, subscription: Subscription) -> i64 {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.subscriptions.push(StoredSubscription { id, subscription });
        id
    }
}

impl SubscriptionStore for MemorySubscriptionStore {
    fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        Ok(self
            .inner
            .read()
            .subscriptions
            .iter()
            .map(|stored| stored.subscription.clone())
            .collect())
    }

    fn resolve_warehouse_id(&self, name: &str) -> Result<WarehouseId, StoreError> {
        self.inner
            .read()
            .warehouses
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.id)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    fn add_subscription(&self, subscription: &Subscription) -> Result<i64, StoreError> {
        Ok(self.insert(subscription.clone()))
    }

    fn remove_subscriptions(
        &self,
        owner: OwnerId,
        warehouse: Option<&str>,
    ) -> Result<usize, StoreError> {
        let mut inner = self.inner.write();
        let before = inner.subscriptions.len();
        inner.subscriptions.retain(|stored| {
            let sub = &stored.subscription;
            let hit = sub.owner == owner
                && match (&sub.warehouses, warehouse) {
                    (WarehouseFilter::Any, None) => true,
                    (WarehouseFilter::Names(names), Some(name)) => names.contains(name),
                    _ => false,
                };
            !hit
        });
        Ok(before - inner.subscriptions.len())
    }

    fn list_subscriptions(&self, owner: OwnerId) -> Result<Vec<StoredSubscription>, StoreError> {
        Ok(self
            .inner
            .read()
            .subscriptions
            .iter()
            .filter(|stored| stored.subscription.owner == owner)
            .cloned()
            .collect())
    }

    fn replace_warehouses(&self, warehouses: &[Warehouse]) -> Result<(), StoreError> {
        self.inner.write().warehouses = warehouses.to_vec();
        Ok(())
    }

    fn list_warehouses(&self, kind: Option<WarehouseKind>) -> Result<Vec<Warehouse>, StoreError> {
        let mut listed: Vec<Warehouse> = self
            .inner
            .read()
            .warehouses
            .iter()
            .filter(|w| kind.map_or(true, |k| w.kind() == k))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }
}

//! Subscription management use cases.
//!
//! Free-form user input (a typed warehouse name, a box type) is resolved
//! against the warehouse directory and the accepted box types before
//! anything is persisted.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{OwnerId, Subscription, Warehouse, WarehouseFilter, WarehouseKind};
use crate::error::SubscriptionError;
use crate::port::outbound::similarity::NameMatcher;
use crate::port::outbound::store::{StoredSubscription, SubscriptionStore};

/// Token that stands for "any warehouse" in user input.
pub const WILDCARD: &str = "*";

/// Limits applied to user-created subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriptionRules {
    /// Lowest similarity score accepted when resolving a warehouse name.
    pub min_name_score: u8,
    /// Canonical box type names.
    pub box_types: Vec<String>,
    /// Upper bound for a subscription's max coefficient.
    pub max_coefficient_limit: i32,
}

impl Default for SubscriptionRules {
    fn default() -> Self {
        Self {
            min_name_score: 70,
            box_types: ["Короба", "Монопаллеты", "Суперсейф", "QR-поставка с коробами"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_coefficient_limit: 20,
        }
    }
}

impl SubscriptionRules {
    /// Canonical spelling of a box type, matched case-insensitively.
    ///
    /// # Errors
    /// Returns [`SubscriptionError::UnknownBoxType`] for anything else.
    pub fn canonical_box_type(&self, input: &str) -> Result<String, SubscriptionError> {
        let wanted = input.trim().to_lowercase();
        self.box_types
            .iter()
            .find(|known| known.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| SubscriptionError::UnknownBoxType {
                input: input.trim().to_string(),
                accepted: self.box_types.join(", "),
            })
    }
}

/// Parameters of a subscription as a user typed them.
#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub owner: OwnerId,
    /// Warehouse name or [`WILDCARD`].
    pub warehouse: String,
    pub max_coefficient: i32,
    pub min_lead_days: i32,
    pub box_type: String,
}

/// Adds, removes and lists subscriptions.
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
    matcher: Arc<dyn NameMatcher>,
    rules: SubscriptionRules,
}

impl SubscriptionService {
    #[must_use]
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        matcher: Arc<dyn NameMatcher>,
        rules: SubscriptionRules,
    ) -> Self {
        Self {
            store,
            matcher,
            rules,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &SubscriptionRules {
        &self.rules
    }

    /// Validate and persist a subscription.
    ///
    /// # Errors
    /// Rejects unknown or too-distant warehouse names, unknown box types and
    /// out-of-range limits; store failures pass through.
    pub fn add(&self, request: &SubscriptionRequest) -> Result<StoredSubscription, SubscriptionError> {
        let limit = self.rules.max_coefficient_limit;
        if request.max_coefficient > limit {
            return Err(SubscriptionError::CoefficientOutOfRange {
                value: request.max_coefficient,
                limit,
            });
        }

        let box_type = self.canonical_box_type(&request.box_type)?;
        let warehouses = match self.resolve_warehouse(&request.warehouse)? {
            Some(name) => {
                let id = self.store.resolve_warehouse_id(&name)?;
                debug!(warehouse = %name, id = %id, "Resolved warehouse");
                WarehouseFilter::name(name)
            }
            None => WarehouseFilter::Any,
        };

        let subscription = Subscription::new(
            request.owner,
            warehouses,
            box_type,
            request.max_coefficient,
            request.min_lead_days,
        );
        if subscription.max_coefficient < 0 {
            return Err(SubscriptionError::CoefficientOutOfRange {
                value: subscription.max_coefficient,
                limit,
            });
        }
        subscription.validate()?;

        let id = self.store.add_subscription(&subscription)?;
        info!(
            owner = %subscription.owner,
            warehouses = %subscription.warehouses,
            id,
            "Subscription added"
        );
        Ok(StoredSubscription { id, subscription })
    }

    /// Remove `owner`'s subscriptions for a warehouse (or the wildcard).
    ///
    /// A name that resolves to a directory entry is removed under its
    /// canonical spelling; otherwise the input is used verbatim.
    ///
    /// # Errors
    /// Store failures pass through.
    pub fn remove(&self, owner: OwnerId, warehouse: &str) -> Result<usize, SubscriptionError> {
        let target = match self.resolve_warehouse(warehouse) {
            Ok(resolved) => resolved,
            Err(SubscriptionError::Store(e)) => return Err(e.into()),
            Err(_) => Some(warehouse.trim().to_string()),
        };

        let removed = self.store.remove_subscriptions(owner, target.as_deref())?;
        info!(owner = %owner, warehouse = ?target, removed, "Subscriptions removed");
        Ok(removed)
    }

    /// `owner`'s subscriptions, oldest first.
    ///
    /// # Errors
    /// Store failures pass through.
    pub fn list(&self, owner: OwnerId) -> Result<Vec<StoredSubscription>, SubscriptionError> {
        Ok(self.store.list_subscriptions(owner)?)
    }

    /// `None` for the wildcard, otherwise the canonical directory name.
    fn resolve_warehouse(&self, input: &str) -> Result<Option<String>, SubscriptionError> {
        let input = input.trim();
        if input == WILDCARD {
            return Ok(None);
        }

        let candidates: Vec<String> = self
            .store
            .list_warehouses(None)?
            .into_iter()
            .map(|w| w.name)
            .collect();

        let Some(best) = self.matcher.best_match(input, &candidates) else {
            return Err(SubscriptionError::UnknownWarehouse {
                input: input.to_string(),
            });
        };
        if best.score < self.rules.min_name_score {
            return Err(SubscriptionError::AmbiguousWarehouse {
                input: input.to_string(),
                closest: best.candidate,
                score: best.score,
            });
        }
        Ok(Some(best.candidate))
    }

    /// Directory entries, optionally restricted to one kind.
    ///
    /// # Errors
    /// Store failures pass through.
    pub fn warehouses(&self, kind: Option<WarehouseKind>) -> Result<Vec<Warehouse>, SubscriptionError> {
        Ok(self.store.list_warehouses(kind)?)
    }

    /// Canonical spelling of a box type, matched case-insensitively.
    ///
    /// # Errors
    /// Returns [`SubscriptionError::UnknownBoxType`] for anything else.
    pub fn canonical_box_type(&self, input: &str) -> Result<String, SubscriptionError> {
        self.rules.canonical_box_type(input)
    }
}

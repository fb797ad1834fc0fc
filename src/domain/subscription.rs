//! Standing notification requests.
//!
//! A [`Subscription`] is owned by the subscription store; the poll loop only
//! reads it. Constraints are validated with [`Subscription::validate`] before
//! matching so a malformed entry can be skipped without aborting a cycle.

use std::collections::BTreeSet;
use std::fmt;

use super::error::DomainError;
use super::id::OwnerId;

/// Which warehouses a subscription watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseFilter {
    /// Every warehouse matches.
    Any,
    /// Only warehouses whose name is in the set.
    Names(BTreeSet<String>),
}

impl WarehouseFilter {
    /// Filter for a single literal warehouse name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Names(BTreeSet::from([name.into()]))
    }

    /// Filter for a set of literal warehouse names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// True if a record from `warehouse_name` passes this filter.
    #[must_use]
    pub fn accepts(&self, warehouse_name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Names(names) => names.contains(warehouse_name),
        }
    }
}

impl fmt::Display for WarehouseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Names(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(" | "))
            }
        }
    }
}

/// A user's standing request to be notified about matching slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub owner: OwnerId,
    pub warehouses: WarehouseFilter,
    pub box_types: BTreeSet<String>,
    /// Inclusive upper bound on the coefficient.
    pub max_coefficient: i32,
    /// Minimum whole days between today and the slot date.
    pub min_lead_days: i32,
}

impl Subscription {
    pub fn new(
        owner: OwnerId,
        warehouses: WarehouseFilter,
        box_type: impl Into<String>,
        max_coefficient: i32,
        min_lead_days: i32,
    ) -> Self {
        Self {
            owner,
            warehouses,
            box_types: BTreeSet::from([box_type.into()]),
            max_coefficient,
            min_lead_days,
        }
    }

    /// Accept an additional delivery type.
    #[must_use]
    pub fn with_box_type(mut self, box_type: impl Into<String>) -> Self {
        self.box_types.insert(box_type.into());
        self
    }

    /// Check the subscription invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_coefficient < 0 {
            return Err(DomainError::NegativeMaxCoefficient {
                value: self.max_coefficient,
            });
        }
        if self.min_lead_days < 0 {
            return Err(DomainError::NegativeLeadDays {
                value: self.min_lead_days,
            });
        }
        if self.box_types.is_empty() {
            return Err(DomainError::EmptyBoxTypes);
        }
        if let WarehouseFilter::Names(names) = &self.warehouses {
            if names.is_empty() {
                return Err(DomainError::EmptyWarehouseFilter);
            }
        }
        Ok(())
    }
}

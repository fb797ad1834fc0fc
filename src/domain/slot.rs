//! Slot observations published by the provider.
//!
//! - [`CoefficientRecord`] - One (warehouse, date, delivery type) observation
//! - [`Warehouse`] - Directory entry (id, name) used for name resolution

use chrono::NaiveDate;

use super::id::WarehouseId;

/// Coefficient value the provider uses for a closed warehouse.
pub const CLOSED_COEFFICIENT: i32 = -1;

/// Name prefix that marks a sorting/service center rather than a warehouse.
pub const SERVICE_CENTER_PREFIX: &str = "СЦ";

/// One acceptance-coefficient observation for a warehouse, date and box type.
///
/// Produced fresh every poll cycle and never mutated. Equality covers every
/// field and is the basis of change detection between cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoefficientRecord {
    pub warehouse_name: String,
    pub warehouse_id: Option<WarehouseId>,
    pub date: NaiveDate,
    /// `-1` means closed; otherwise lower is cheaper.
    pub coefficient: i32,
    pub box_type_name: String,
}

impl CoefficientRecord {
    pub fn new(
        warehouse_name: impl Into<String>,
        date: NaiveDate,
        coefficient: i32,
        box_type_name: impl Into<String>,
    ) -> Self {
        Self {
            warehouse_name: warehouse_name.into(),
            warehouse_id: None,
            date,
            coefficient,
            box_type_name: box_type_name.into(),
        }
    }

    #[must_use]
    pub fn with_warehouse_id(mut self, id: WarehouseId) -> Self {
        self.warehouse_id = Some(id);
        self
    }

    /// True when the warehouse accepts nothing for this slot.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.coefficient == CLOSED_COEFFICIENT
    }
}

/// Kind of acceptance point, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseKind {
    Warehouse,
    ServiceCenter,
}

impl WarehouseKind {
    /// Classify a warehouse by its display name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name.starts_with(SERVICE_CENTER_PREFIX) {
            Self::ServiceCenter
        } else {
            Self::Warehouse
        }
    }
}

/// An entry of the provider's warehouse directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
}

impl Warehouse {
    pub fn new(id: WarehouseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> WarehouseKind {
        WarehouseKind::of(&self.name)
    }
}

//! Domain validation errors.
//!
//! A subscription that violates its invariants is skipped for the current
//! cycle, never aborting the cycle.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The acceptable coefficient ceiling must be zero or greater.
    #[error("max coefficient must be >= 0, got {value}")]
    NegativeMaxCoefficient {
        /// The invalid ceiling.
        value: i32,
    },

    /// Lead time cannot point into the past.
    #[error("min lead days must be >= 0, got {value}")]
    NegativeLeadDays {
        /// The invalid lead time.
        value: i32,
    },

    /// A subscription must accept at least one delivery type.
    #[error("box type filter cannot be empty")]
    EmptyBoxTypes,

    /// A literal warehouse filter must name at least one warehouse.
    #[error("warehouse filter cannot be an empty name set")]
    EmptyWarehouseFilter,
}

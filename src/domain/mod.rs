//! Provider-agnostic domain logic: records, subscriptions, matching, diffing.

pub mod diff;
pub mod error;
pub mod id;
pub mod matching;
pub mod slot;
pub mod subscription;

pub use diff::{dedupe, diff, sort_for_presentation};
pub use error::DomainError;
pub use id::{OwnerId, WarehouseId};
pub use matching::{find_matches, lead_days, matches, MatchResult};
pub use slot::{CoefficientRecord, Warehouse, WarehouseKind, CLOSED_COEFFICIENT};
pub use subscription::{Subscription, WarehouseFilter};

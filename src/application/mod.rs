//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod dispatch;
pub mod poller;
pub mod search;
pub mod snapshot;
pub mod subscription;

pub use dispatch::{chunk_message, format_line, group_by_owner, DispatchReport, Dispatcher};
pub use poller::{CycleOutcome, Poller, PollerConfig, PollerState};
pub use search::{availability, search, Availability, SlotQueries};
pub use snapshot::SnapshotCache;
pub use subscription::{SubscriptionRequest, SubscriptionRules, SubscriptionService, WILDCARD};

//! Outbound adapters (driven side).

pub mod memory;
pub mod notifier;
pub mod similarity;
pub mod sqlite;
pub mod wildberries;

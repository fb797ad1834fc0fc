//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for records, warehouses and subscriptions.
//! - [`provider`] - `ScriptedFetcher`, a provider with queued snapshots.
//! - [`notifier`] - `RecordingNotifier`, which keeps every sent chunk.

pub mod domain;
pub mod notifier;
pub mod provider;

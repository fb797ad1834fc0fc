//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! - [`provider::SnapshotFetcher`] - coefficient snapshot and warehouse directory
//! - [`store::SubscriptionStore`] - subscriptions and the warehouse directory
//! - [`notifier::Notifier`] - per-owner message transport
//! - [`similarity::NameMatcher`] - approximate warehouse-name resolution

pub mod notifier;
pub mod provider;
pub mod similarity;
pub mod store;

//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed [`SqliteSubscriptionStore`] using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteSubscriptionStore;

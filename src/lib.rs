//! Slotwatch - warehouse acceptance slot watcher.
//!
//! Polls the supplies API for acceptance coefficients, matches every slot
//! against per-owner subscriptions and notifies owners about slots that were
//! not present in the previous snapshot.
//!
//! # Architecture
//!
//! - [`domain`] - Records, subscriptions, matching and snapshot diffing
//! - [`port`] - Traits the core depends on (provider, store, notifier, name matcher)
//! - [`adapter`] - Supplies API client, SQLite store, Telegram bot, CLI
//! - [`application`] - Poll cycle, dispatch, subscription management, search
//! - [`infrastructure`] - Configuration, wiring and the long-running runtime
//!
//! # Features
//!
//! - `telegram` (default) - Telegram notifier and bot commands
//! - `testkit` - Test doubles and builders for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

//! Telegram notification and command handling.
//!
//! Delivers slot notifications to owner chats and answers the bot commands
//! used to manage subscriptions and query the latest snapshot.

mod auth;
mod command;
mod format;

pub mod control;
pub mod notifier;

pub use control::TelegramControl;
pub use notifier::{spawn_command_worker, TelegramConfig, TelegramNotifier};

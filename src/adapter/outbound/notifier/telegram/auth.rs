//! Authorization for Telegram command handling.

use chrono::NaiveDate;
use teloxide::types::ChatId;
use tracing::warn;

use super::command::{command_help, parse_command, CommandParseError};
use super::control::TelegramControl;
use crate::domain::OwnerId;

/// Process a message and return a response if it's an authorized command.
///
/// Returns `None` for:
/// - Messages from chats outside a non-empty `allowed_chats`
/// - Messages that are not commands (don't start with `/`)
///
/// Returns `Some(response)` for:
/// - Valid commands from an authorized chat
/// - Invalid commands (with error message and help)
pub fn command_response_for_message(
    text: &str,
    incoming_chat: ChatId,
    allowed_chats: &[i64],
    control: &TelegramControl,
    today: NaiveDate,
) -> Option<String> {
    if !is_authorized_chat(incoming_chat, allowed_chats) {
        return None;
    }

    match parse_command(text) {
        Ok(command) => Some(control.execute(OwnerId::new(incoming_chat.0), command, today)),
        Err(CommandParseError::NotACommand) => None,
        Err(err) => Some(format!("Invalid command: {err}\n\n{}", command_help())),
    }
}

/// An empty allowlist admits every chat.
fn is_authorized_chat(incoming_chat: ChatId, allowed_chats: &[i64]) -> bool {
    if allowed_chats.is_empty() || allowed_chats.contains(&incoming_chat.0) {
        return true;
    }

    warn!(
        chat_id = incoming_chat.0,
        "Ignoring Telegram message from unauthorized chat"
    );
    false
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::adapter::outbound::memory::MemorySubscriptionStore;
    use crate::adapter::outbound::similarity::LevenshteinMatcher;
    use crate::application::{SlotQueries, SnapshotCache, SubscriptionRules, SubscriptionService};

    fn control() -> TelegramControl {
        let service = SubscriptionService::new(
            Arc::new(MemorySubscriptionStore::new()),
            Arc::new(LevenshteinMatcher::new()),
            SubscriptionRules::default(),
        );
        TelegramControl::new(
            Arc::new(service),
            SlotQueries::new(Arc::new(SnapshotCache::new())),
        )
    }

    fn reply(text: &str, chat: i64, allowed: &[i64]) -> Option<String> {
        command_response_for_message(
            text,
            ChatId(chat),
            allowed,
            &control(),
            Utc::now().date_naive(),
        )
    }

    #[test]
    fn empty_allowlist_admits_everyone() {
        assert!(reply("/help", 42, &[]).unwrap().contains("Commands"));
        assert!(reply("/help", -100, &[]).is_some());
    }

    #[test]
    fn allowlist_filters_chats() {
        let allowed = [42, -123_456_789];
        assert!(reply("/list", 42, &allowed).is_some());
        assert!(reply("/list", -123_456_789, &allowed).is_some());
        assert!(reply("/list", 7, &allowed).is_none());
        assert!(reply("/list@slot_bot", 7, &allowed).is_none());
    }

    #[test]
    fn invalid_command_shows_error_and_help() {
        let response = reply("/unknown", 42, &[]).unwrap();
        assert!(response.contains("Invalid command"));
        assert!(response.contains("unknown command"));
        assert!(response.contains("/watch"));

        let response = reply("/watch Казань; x; 1; Короба", 42, &[]).unwrap();
        assert!(response.contains("whole number"));
    }

    #[test]
    fn plain_text_is_ignored() {
        assert!(reply("hello", 42, &[]).is_none());
        assert!(reply("", 42, &[]).is_none());
        assert!(reply("   ", 42, &[]).is_none());
    }

    #[test]
    fn list_is_scoped_to_the_sending_chat() {
        let response = reply("  /list  ", 42, &[]).unwrap();
        assert!(response.contains("no subscriptions"));
    }
}

//! Telegram notification delivery and command handling.
//!
//! [`TelegramNotifier`] sends slot notifications to owner chats; an owner ID
//! is the chat ID. [`spawn_command_worker`] runs the inbound command loop
//! that lets users manage their subscriptions.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::auth::command_response_for_message;
use super::command::bot_commands;
use super::control::TelegramControl;
use crate::application::chunk_message;
use crate::domain::OwnerId;
use crate::error::NotifyError;
use crate::port::outbound::notifier::Notifier;

/// Configuration for the Telegram adapter.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Platform limit for a single message, in characters.
    pub max_message_chars: usize,
    /// Chats allowed to issue commands; empty admits everyone.
    pub allowed_chats: Vec<i64>,
}

/// Telegram notifier that sends messages to owner chats.
pub struct TelegramNotifier {
    bot: Bot,
    max_message_chars: usize,
}

impl TelegramNotifier {
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
            max_message_chars: config.max_message_chars,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, owner: OwnerId, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(ChatId(owner.get()), text)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError {
                owner: owner.get(),
                reason: e.to_string(),
            })
    }

    fn max_message_chars(&self) -> usize {
        self.max_message_chars
    }
}

/// Spawn the background task that answers bot commands.
pub fn spawn_command_worker(config: TelegramConfig, control: TelegramControl) -> JoinHandle<()> {
    tokio::spawn(telegram_command_worker(config, control))
}

/// Background worker that handles inbound Telegram commands.
async fn telegram_command_worker(config: TelegramConfig, control: TelegramControl) {
    let bot = Bot::new(&config.bot_token);

    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(
        allowed_chats = config.allowed_chats.len(),
        "Telegram command listener started"
    );

    let allowed_chats = config.allowed_chats;
    let max_chars = config.max_message_chars;
    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let control = control.clone();
        let allowed_chats = allowed_chats.clone();
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            let today = Utc::now().date_naive();
            if let Some(response) =
                command_response_for_message(text, msg.chat.id, &allowed_chats, &control, today)
            {
                for chunk in chunk_message(&response, max_chars) {
                    if let Err(e) = bot.send_message(msg.chat.id, chunk).await {
                        error!(error = %e, "Failed to send Telegram command response");
                        break;
                    }
                }
            }

            respond(())
        }
    })
    .await;
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

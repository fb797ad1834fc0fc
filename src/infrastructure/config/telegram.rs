//! Telegram notification configuration.

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

const fn default_max_message_chars() -> usize {
    4096
}

/// Telegram notification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Deliver notifications through Telegram.
    #[serde(default)]
    pub enabled: bool,
    /// Answer subscription commands sent to the bot.
    #[serde(default = "default_true")]
    pub commands_enabled: bool,
    /// Platform limit for a single message.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
    /// Chats allowed to issue commands; empty admits everyone.
    #[serde(default)]
    pub allowed_chats: Vec<i64>,
    /// Bot token, loaded from `TELEGRAM_BOT_TOKEN`.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            commands_enabled: default_true(),
            max_message_chars: default_max_message_chars(),
            allowed_chats: Vec::new(),
            bot_token: None,
        }
    }
}

#[cfg(feature = "telegram")]
impl TelegramAppConfig {
    /// Adapter settings, or `None` without a bot token.
    #[must_use]
    pub fn adapter_config(&self) -> Option<crate::adapter::outbound::notifier::telegram::TelegramConfig> {
        let bot_token = self.bot_token.clone()?;
        Some(crate::adapter::outbound::notifier::telegram::TelegramConfig {
            bot_token,
            max_message_chars: self.max_message_chars,
            allowed_chats: self.allowed_chats.clone(),
        })
    }
}

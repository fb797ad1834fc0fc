//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; secrets come only from the
//! environment (`WB_TOKEN`, `TELEGRAM_BOT_TOKEN`).
//!
//! # Example
//!
//! ```no_run
//! use slotwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::matching::MatchingConfig;
use super::poller::PollerAppConfig;
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::wildberries::ProviderConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the supplies API token.
pub const PROVIDER_TOKEN_ENV: &str = "WB_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Supplies API connection settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Poll loop timing.
    #[serde(default)]
    pub poller: PollerAppConfig,

    /// Telegram delivery and bot commands.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Rules for user-created subscriptions.
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to "slotwatch.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "slotwatch.db".to_string()
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            poller: PollerAppConfig::default(),
            telegram: TelegramAppConfig::default(),
            matching: MatchingConfig::default(),
            logging: LoggingConfig::default(),
            database: default_database_path(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads tokens from `WB_TOKEN` and `TELEGRAM_BOT_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a zero interval)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets are never read from the config file
        config.provider.token = env_secret(PROVIDER_TOKEN_ENV);
        config.telegram.bot_token = env_secret(TELEGRAM_TOKEN_ENV);

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.provider.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        Url::parse(&self.provider.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_url",
            reason: e.to_string(),
        })?;
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.poller.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.poller.retry_delay_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_delay_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.telegram.max_message_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_message_chars",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.matching.min_name_score > 100 {
            return Err(ConfigError::InvalidValue {
                field: "min_name_score",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        if self.matching.box_types.iter().all(|b| b.trim().is_empty()) {
            return Err(ConfigError::MissingField { field: "box_types" }.into());
        }
        if self.matching.max_coefficient_limit < 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_coefficient_limit",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        Ok(())
    }

    /// The supplies API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `WB_TOKEN` is unset.
    #[allow(clippy::result_large_err)]
    pub fn provider_token(&self) -> Result<&str> {
        self.provider.token.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: PROVIDER_TOKEN_ENV,
            }
            .into()
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn invalid_field(toml: &str) -> &'static str {
        match Config::parse_toml(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. }))
            | Err(Error::Config(ConfigError::MissingField { field })) => field,
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(
            config.provider.api_url,
            "https://supplies-api.wildberries.ru/api/v1"
        );
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.poller.interval_secs, 15);
        assert_eq!(config.poller.retry_delay_secs, 10);
        assert!(config.poller.dedupe_within_cycle);
        assert!(!config.telegram.enabled);
        assert_eq!(config.telegram.max_message_chars, 4096);
        assert_eq!(config.matching.min_name_score, 70);
        assert_eq!(config.matching.box_types.len(), 4);
        assert_eq!(config.database, "slotwatch.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
database = "/tmp/slots.db"

[poller]
interval_secs = 60
dedupe_within_cycle = false

[telegram]
enabled = true
allowed_chats = [1, -100]

[matching]
box_types = ["Короба"]
"#,
        )
        .unwrap();
        assert_eq!(config.database, "/tmp/slots.db");
        assert_eq!(config.poller.interval_secs, 60);
        assert_eq!(config.poller.retry_delay_secs, 10);
        assert!(!config.poller.dedupe_within_cycle);
        assert!(config.telegram.enabled);
        assert_eq!(config.telegram.allowed_chats, vec![1, -100]);
        assert_eq!(config.matching.box_types, vec!["Короба".to_string()]);
    }

    #[test]
    fn zero_durations_are_rejected() {
        assert_eq!(invalid_field("[poller]\ninterval_secs = 0"), "interval_secs");
        assert_eq!(invalid_field("[poller]\nretry_delay_secs = 0"), "retry_delay_secs");
        assert_eq!(invalid_field("[provider]\ntimeout_secs = 0"), "timeout_secs");
    }

    #[test]
    fn matching_bounds_are_checked() {
        assert_eq!(invalid_field("[matching]\nmin_name_score = 101"), "min_name_score");
        assert_eq!(invalid_field("[matching]\nbox_types = []"), "box_types");
        assert_eq!(
            invalid_field("[matching]\nmax_coefficient_limit = -1"),
            "max_coefficient_limit"
        );
    }

    #[test]
    fn bad_api_url_is_rejected() {
        assert_eq!(invalid_field("[provider]\napi_url = \"not a url\""), "api_url");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse_toml("[poller"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }
}

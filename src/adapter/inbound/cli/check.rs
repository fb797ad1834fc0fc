//! Configuration validation command handler.

use std::path::Path;

use super::output;
use crate::error::Result;

/// Validate configuration file without starting the poller.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = super::load_config(path)?;

    output::title("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::title("Summary");
    output::field("Provider", &config.provider.api_url);
    output::field("Database", &config.database);
    output::field("Interval", format!("{}s", config.poller.interval_secs));
    output::field("Box types", config.matching.box_types.join(", "));

    if config.provider.token.is_some() {
        output::success("Provider token detected");
    } else {
        output::warning("Provider token not configured (set WB_TOKEN)");
    }

    if config.telegram.enabled {
        if config.telegram.bot_token.is_some() {
            output::success("Telegram integration configured");
        } else {
            output::warning("Telegram enabled but TELEGRAM_BOT_TOKEN is missing");
        }
    } else {
        output::field("Telegram", "disabled");
    }

    output::success("Configuration check complete");

    Ok(())
}

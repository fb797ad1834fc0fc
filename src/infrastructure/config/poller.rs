//! Poll loop timing configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::PollerConfig;

const fn default_interval_secs() -> u64 {
    15
}

const fn default_retry_delay_secs() -> u64 {
    10
}

const fn default_true() -> bool {
    true
}

/// `[poller]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PollerAppConfig {
    /// Sleep after a successful cycle.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Sleep after a failed fetch.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_true")]
    pub dedupe_within_cycle: bool,
}

impl Default for PollerAppConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            retry_delay_secs: default_retry_delay_secs(),
            dedupe_within_cycle: default_true(),
        }
    }
}

impl From<&PollerAppConfig> for PollerConfig {
    fn from(config: &PollerAppConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            dedupe_within_cycle: config.dedupe_within_cycle,
        }
    }
}

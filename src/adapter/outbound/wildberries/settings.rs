//! Provider connection settings.

use serde::Deserialize;

/// Settings for the supplies API.
///
/// The token is never read from the config file; it is loaded from the
/// `WB_TOKEN` environment variable at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the supplies API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound on one request, in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// API token loaded from `WB_TOKEN` at runtime.
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_api_url() -> String {
    "https://supplies-api.wildberries.ru/api/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

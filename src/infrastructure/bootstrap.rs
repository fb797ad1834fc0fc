//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{
    spawn_command_worker, TelegramControl, TelegramNotifier,
};
use crate::adapter::outbound::similarity::LevenshteinMatcher;
use crate::adapter::outbound::sqlite::database::connection::open;
use crate::adapter::outbound::sqlite::SqliteSubscriptionStore;
use crate::adapter::outbound::wildberries::WildberriesClient;
#[cfg(feature = "telegram")]
use crate::application::SlotQueries;
use crate::application::SubscriptionService;
#[cfg(feature = "telegram")]
use crate::error::ConfigError;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
#[cfg(feature = "telegram")]
use crate::infrastructure::config::settings::TELEGRAM_TOKEN_ENV;
use crate::port::outbound::notifier::{LogNotifier, Notifier};
use crate::port::outbound::provider::SnapshotFetcher;
use crate::port::outbound::store::SubscriptionStore;

/// Open the SQLite store, running pending migrations.
#[allow(clippy::result_large_err)]
pub fn open_store(config: &Config) -> Result<Arc<dyn SubscriptionStore>> {
    let pool = open(&config.database)?;
    info!(database = %config.database, "Database initialized");
    Ok(Arc::new(SqliteSubscriptionStore::new(pool)))
}

/// Build the supplies API client. Requires `WB_TOKEN`.
#[allow(clippy::result_large_err)]
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn SnapshotFetcher>> {
    let token = config.provider_token()?;
    Ok(Arc::new(WildberriesClient::from_config(&config.provider, token)))
}

/// Subscription service backed by `store` with the configured rules.
#[must_use]
pub fn build_subscription_service(
    config: &Config,
    store: Arc<dyn SubscriptionStore>,
) -> SubscriptionService {
    SubscriptionService::new(
        store,
        Arc::new(LevenshteinMatcher::new()),
        (&config.matching).into(),
    )
}

/// Refresh the stored warehouse directory from the provider.
///
/// Failures are logged and the stored directory is kept. Returns the number
/// of directory entries written.
pub async fn sync_warehouses(
    fetcher: &dyn SnapshotFetcher,
    store: &dyn SubscriptionStore,
) -> Option<usize> {
    let warehouses = match fetcher.fetch_warehouses().await {
        Ok(warehouses) => warehouses,
        Err(e) => {
            warn!(error = %e, "Warehouse directory sync failed, using stored directory");
            return None;
        }
    };

    match store.replace_warehouses(&warehouses) {
        Ok(()) => {
            info!(count = warehouses.len(), "Warehouse directory synced");
            Some(warehouses.len())
        }
        Err(e) => {
            warn!(error = %e, "Failed to store warehouse directory");
            None
        }
    }
}

/// Build the notification transport.
///
/// Dry runs and configurations without Telegram log notifications instead.
#[allow(clippy::result_large_err)]
pub fn build_notifier(config: &Config, dry_run: bool) -> Result<Arc<dyn Notifier>> {
    let log_notifier = || Arc::new(LogNotifier::new(config.telegram.max_message_chars));

    if dry_run {
        info!("Dry run: notifications are logged, not sent");
        return Ok(log_notifier());
    }
    if !config.telegram.enabled {
        warn!("Telegram disabled, notifications are logged only");
        return Ok(log_notifier());
    }

    #[cfg(feature = "telegram")]
    {
        let tg_config = config
            .telegram
            .adapter_config()
            .ok_or(ConfigError::MissingField {
                field: TELEGRAM_TOKEN_ENV,
            })?;
        info!("Telegram notifier enabled");
        return Ok(Arc::new(TelegramNotifier::new(&tg_config)));
    }

    #[cfg(not(feature = "telegram"))]
    {
        warn!("Telegram enabled in config but the telegram feature is not compiled in");
        return Ok(log_notifier());
    }
}

/// Start answering bot commands when Telegram commands are enabled.
#[cfg(feature = "telegram")]
pub fn start_command_worker(
    config: &Config,
    subscriptions: Arc<SubscriptionService>,
    queries: SlotQueries,
) -> Option<tokio::task::JoinHandle<()>> {
    if !(config.telegram.enabled && config.telegram.commands_enabled) {
        return None;
    }
    let Some(tg_config) = config.telegram.adapter_config() else {
        warn!("Telegram commands enabled but TELEGRAM_BOT_TOKEN is not set");
        return None;
    };
    Some(spawn_command_worker(
        tg_config,
        TelegramControl::new(subscriptions, queries),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemorySubscriptionStore;
    use crate::domain::{CoefficientRecord, Warehouse, WarehouseId};
    use crate::error::FetchError;
    use async_trait::async_trait;

    struct Directory(std::result::Result<Vec<Warehouse>, FetchError>);

    #[async_trait]
    impl SnapshotFetcher for Directory {
        async fn fetch_coefficients(&self) -> std::result::Result<Vec<CoefficientRecord>, FetchError> {
            Ok(Vec::new())
        }

        async fn fetch_warehouses(&self) -> std::result::Result<Vec<Warehouse>, FetchError> {
            self.0.clone()
        }

        fn provider_name(&self) -> &'static str {
            "directory"
        }
    }

    #[tokio::test]
    async fn sync_replaces_directory() {
        let store = MemorySubscriptionStore::new();
        let fetcher = Directory(Ok(vec![Warehouse::new(WarehouseId::new(1), "Тула")]));

        assert_eq!(sync_warehouses(&fetcher, &store).await, Some(1));
        assert_eq!(store.list_warehouses(None).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_sync_keeps_stored_directory() {
        let store = MemorySubscriptionStore::new();
        store
            .replace_warehouses(&[Warehouse::new(WarehouseId::new(1), "Тула")])
            .unwrap();
        let fetcher = Directory(Err(FetchError::new("HTTP 500")));

        assert_eq!(sync_warehouses(&fetcher, &store).await, None);
        assert_eq!(store.list_warehouses(None).unwrap().len(), 1);
    }

    #[test]
    fn dry_run_and_disabled_telegram_log_instead() {
        let mut config = Config::default();
        config.telegram.max_message_chars = 1000;
        assert_eq!(build_notifier(&config, true).unwrap().max_message_chars(), 1000);
        assert_eq!(build_notifier(&config, false).unwrap().max_message_chars(), 1000);
    }

    #[cfg(feature = "telegram")]
    #[test]
    fn enabled_telegram_requires_token() {
        let mut config = Config::default();
        config.telegram.enabled = true;
        config.telegram.bot_token = None;
        assert!(build_notifier(&config, false).is_err());
    }

    #[test]
    fn fetcher_requires_token() {
        let config = Config::default();
        assert!(build_fetcher(&config).is_err());
    }
}

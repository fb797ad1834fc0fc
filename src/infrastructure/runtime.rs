//! Long-running service entry point.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::bootstrap;
use crate::application::{Poller, SnapshotCache};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Wire every component and poll until `shutdown` fires.
///
/// Configuration problems (missing tokens, unusable database) surface here,
/// before the poll loop starts.
pub async fn run_with_shutdown(
    config: Config,
    dry_run: bool,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!(dry_run, "Starting slotwatch");

    let store = bootstrap::open_store(&config)?;
    let fetcher = bootstrap::build_fetcher(&config)?;
    let notifier = bootstrap::build_notifier(&config, dry_run)?;

    bootstrap::sync_warehouses(fetcher.as_ref(), store.as_ref()).await;

    let cache = Arc::new(SnapshotCache::new());

    #[cfg(feature = "telegram")]
    let command_worker = {
        let subscriptions = Arc::new(bootstrap::build_subscription_service(
            &config,
            Arc::clone(&store),
        ));
        bootstrap::start_command_worker(
            &config,
            subscriptions,
            crate::application::SlotQueries::new(Arc::clone(&cache)),
        )
    };

    let poller = Poller::new(
        fetcher,
        store,
        notifier,
        cache,
        (&config.poller).into(),
    );
    let state = poller.run(shutdown).await;

    #[cfg(feature = "telegram")]
    if let Some(handle) = command_worker {
        handle.abort();
    }

    info!(cycles = state.cycles(), "slotwatch stopped");
    Ok(())
}

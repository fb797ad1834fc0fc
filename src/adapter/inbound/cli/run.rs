//! Handler for the `run` command.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use super::command::RunArgs;
use super::output::{self, Mode};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime::run_with_shutdown;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = super::load_config(&args.config)?;
    if output::verbosity() > 0 {
        config.logging.level = "debug".to_string();
    }
    match output::mode() {
        Mode::Json => config.logging.format = "json".to_string(),
        Mode::Human => print_startup_config(&config, args.dry_run),
        Mode::Quiet => {}
    }
    config.init_logging();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let dry_run = args.dry_run;
    let mut app_handle =
        tokio::spawn(async move { run_with_shutdown(config, dry_run, shutdown_rx).await });

    tokio::select! {
        result = &mut app_handle => {
            return map_app_result(result);
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
            let _ = shutdown_tx.send(true);
        }
    }

    map_app_result(app_handle.await)
}

fn map_app_result(result: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => {
            error!(error = %error, "Application exited with error");
            Err(error)
        }
        Err(error) => {
            error!(error = %error, "Application task join failed");
            Err(Error::Task(error.to_string()))
        }
    }
}

fn print_startup_config(config: &Config, dry_run: bool) {
    output::banner(env!("CARGO_PKG_VERSION"));
    output::field("Provider", &config.provider.api_url);
    output::field("Database", &config.database);
    output::field(
        "Interval",
        format!(
            "{}s (retry {}s)",
            config.poller.interval_secs, config.poller.retry_delay_secs
        ),
    );
    let telegram = if dry_run {
        "dry run (logged)"
    } else if config.telegram.enabled {
        "enabled"
    } else {
        "disabled (logged)"
    };
    output::field("Telegram", telegram);
    println!();
}

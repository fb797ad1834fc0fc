//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod output;
pub mod run;
pub mod search;
pub mod subscriptions;
pub mod warehouses;

use std::path::Path;

use self::command::{CheckCommand, Cli, Commands, SubscriptionCommand, WarehouseCommand};
use self::output::OutputConfig;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Run the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(&arg.config),
        Commands::Search(args) => search::execute(&args).await,
        Commands::Warehouses(WarehouseCommand::Sync(arg)) => warehouses::sync(&arg.config).await,
        Commands::Warehouses(WarehouseCommand::List(args)) => warehouses::list(&args),
        Commands::Subscriptions(SubscriptionCommand::Add(args)) => subscriptions::add(&args),
        Commands::Subscriptions(SubscriptionCommand::Remove(args)) => subscriptions::remove(&args),
        Commands::Subscriptions(SubscriptionCommand::List(args)) => subscriptions::list(&args),
    }
}

/// Load and validate the configuration file for a one-shot command.
#[allow(clippy::result_large_err)]
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    Config::load(path)
}

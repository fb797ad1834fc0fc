//! Command-line interface definitions.
//!
//! Defines the CLI structure for the slotwatch application using `clap`.
//! Besides running the poller, the CLI offers one-shot searches and
//! subscription and warehouse-directory management against the local store.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default configuration path, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Wildberries acceptance slot watcher
#[derive(Parser, Debug)]
#[command(name = "slotwatch")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the slotwatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the provider and notify subscribers (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Search current acceptance slots once
    Search(SearchArgs),

    /// Manage the warehouse directory
    #[command(subcommand)]
    Warehouses(WarehouseCommand),

    /// Manage subscriptions
    #[command(subcommand)]
    Subscriptions(SubscriptionCommand),
}

/// Subcommands for `slotwatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Subcommands for `slotwatch warehouses`.
#[derive(Subcommand, Debug)]
pub enum WarehouseCommand {
    /// Fetch the directory from the provider into the local store.
    Sync(ConfigPathArg),
    /// List stored directory entries.
    List(WarehouseListArgs),
}

/// Subcommands for `slotwatch subscriptions`.
#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// Add a subscription for an owner.
    Add(SubscriptionAddArgs),
    /// Remove an owner's subscriptions for a warehouse.
    Remove(SubscriptionRemoveArgs),
    /// List an owner's subscriptions.
    List(OwnerArgs),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Log notifications instead of sending them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Delivery type, e.g. "Короба".
    #[arg(long)]
    pub box_type: String,

    /// Minimum days between today and the slot date.
    #[arg(long, default_value_t = 0)]
    pub lead_days: i32,

    /// Highest acceptable coefficient.
    #[arg(long, default_value_t = 0)]
    pub max_coefficient: i32,
}

/// Arguments for the `warehouses list` subcommand.
#[derive(Args, Debug)]
pub struct WarehouseListArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// List service centers instead of warehouses.
    #[arg(long)]
    pub service_centers: bool,
}

/// Owner selection shared by subscription commands.
#[derive(Args, Debug)]
pub struct OwnerArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Owner (Telegram chat) ID.
    #[arg(long, allow_hyphen_values = true)]
    pub owner: i64,
}

/// Arguments for the `subscriptions add` subcommand.
#[derive(Args, Debug)]
pub struct SubscriptionAddArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Warehouse name, or `*` for any warehouse.
    #[arg(long)]
    pub warehouse: String,

    /// Highest acceptable coefficient.
    #[arg(long)]
    pub max_coefficient: i32,

    /// Minimum days between today and the slot date.
    #[arg(long)]
    pub lead_days: i32,

    /// Delivery type, e.g. "Короба".
    #[arg(long)]
    pub box_type: String,
}

/// Arguments for the `subscriptions remove` subcommand.
#[derive(Args, Debug)]
pub struct SubscriptionRemoveArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Warehouse name, or `*` for the wildcard subscriptions.
    #[arg(long)]
    pub warehouse: String,
}

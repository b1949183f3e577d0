//! Command-line interface definitions.
//!
//! Defines the CLI structure for tokenwatch using `clap`: running the alert
//! scheduler, checking the current price, managing alerts and inspecting
//! configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// WoW Token price alert monitor
#[derive(Parser, Debug)]
#[command(name = "tokenwatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.tokenwatch/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

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

/// Top-level subcommands for the tokenwatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the alert scheduler until interrupted
    Run,

    /// Print the current WoW Token price
    Price(PriceArgs),

    /// Manage price alerts
    #[command(subcommand)]
    Alert(AlertCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `tokenwatch price`.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Region to check [default: alerts.default_region]
    #[arg(short, long)]
    pub region: Option<String>,
}

/// Subcommands for `tokenwatch alert`.
#[derive(Subcommand, Debug)]
pub enum AlertCommand {
    /// Create a price alert
    Set(AlertSetArgs),
    /// List a subscriber's active alerts
    List(SubscriberArg),
    /// Remove one of a subscriber's alerts
    Remove(AlertRemoveArgs),
    /// Show any alert by id, including triggered ones
    Show(AlertIdArg),
}

/// Arguments for `tokenwatch alert set`.
#[derive(Args, Debug)]
pub struct AlertSetArgs {
    /// Subscriber that owns the alert
    #[arg(short, long)]
    pub subscriber: String,

    /// Where the notification is delivered (a Telegram chat id when Telegram is enabled)
    #[arg(short, long)]
    pub destination: String,

    /// Threshold in gold
    #[arg(short, long)]
    pub price: u64,

    /// Fire when the price goes `above` or `below` the threshold
    #[arg(long, default_value = "above")]
    pub direction: String,

    /// Region to monitor [default: alerts.default_region]
    #[arg(short, long)]
    pub region: Option<String>,
}

/// Subscriber selector.
#[derive(Args, Debug)]
pub struct SubscriberArg {
    #[arg(short, long)]
    pub subscriber: String,
}

/// Arguments for `tokenwatch alert remove`.
#[derive(Args, Debug)]
pub struct AlertRemoveArgs {
    /// Subscriber that owns the alert
    #[arg(short, long)]
    pub subscriber: String,

    /// Alert id (from `tokenwatch alert list`)
    pub id: String,
}

/// Alert id argument.
#[derive(Args, Debug)]
pub struct AlertIdArg {
    pub id: String,
}

/// Subcommands for `tokenwatch config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

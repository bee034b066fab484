//! Command-line interface definitions.
//!
//! Defines the CLI structure for oddsboard using `clap`. Offers and odds
//! share one set of subcommands; odds add `prune`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Ranked bookie offers and best available odds
#[derive(Parser, Debug)]
#[command(name = "oddsboard")]
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

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage bookie offers
    #[command(subcommand)]
    Offer(EntityCommand),

    /// Manage odds records
    #[command(subcommand)]
    Odd(OddCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Operations shared by both ordered collections.
#[derive(Subcommand, Debug)]
pub enum EntityCommand {
    /// List one page, sorted by order
    List(ListArgs),
    /// Show one entry
    Get(IdArg),
    /// Create an entry from JSON
    Create(BodyArgs),
    /// Update fields of an entry from JSON
    Update(UpdateArgs),
    /// Delete an entry and close the gap
    Delete(IdArg),
    /// Move an entry to a new position
    Reorder(ReorderArgs),
}

/// Subcommands for `oddsboard odd`.
#[derive(Subcommand, Debug)]
pub enum OddCommand {
    #[command(flatten)]
    Entity(EntityCommand),
    /// Delete every odds record whose event has started
    Prune(PruneArgs),
}

/// Subcommands for `oddsboard config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Entries per page
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub size: i64,

    /// Include disabled offers or suspended odds
    #[arg(long)]
    pub disabled: bool,
}

/// A single entity id.
#[derive(Args, Debug)]
pub struct IdArg {
    /// Entity id
    pub id: String,
}

/// JSON body supplied inline or from a file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct BodyArgs {
    /// Inline JSON body
    #[arg(long)]
    pub data: Option<String>,

    /// Path to a JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entity id
    pub id: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

/// Arguments for `reorder`.
#[derive(Args, Debug)]
pub struct ReorderArgs {
    /// Entity id
    pub id: String,

    /// Target position, 1-based
    #[arg(allow_negative_numbers = true)]
    pub order: i64,
}

/// Arguments for `odd prune`.
#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Cut-off instant (RFC 3339); defaults to now
    #[arg(long)]
    pub before: Option<String>,
}

//! CLI module graph and dispatch.

pub mod catalog;
pub mod command;
pub mod config;
pub mod output;
pub mod paths;

use std::path::Path;

use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand, OddCommand};
use self::output::OutputConfig;
use crate::adapter::outbound::sqlite::SqliteEntityStore;
use crate::application::catalog::CatalogService;
use crate::domain::Collection;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run a parsed command line.
///
/// # Errors
///
/// Any failure of the selected command; the caller reports it.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
        Commands::Offer(cmd) => {
            let service = open_catalog(&cli.config, cli.quiet, cli.verbose)?;
            catalog::execute(&service, Collection::Offers, cmd).await
        }
        Commands::Odd(OddCommand::Entity(cmd)) => {
            let service = open_catalog(&cli.config, cli.quiet, cli.verbose)?;
            catalog::execute(&service, Collection::Odds, cmd).await
        }
        Commands::Odd(OddCommand::Prune(args)) => {
            let service = open_catalog(&cli.config, cli.quiet, cli.verbose)?;
            catalog::prune(&service, &args).await
        }
    }
}

/// Load settings, start logging and open the configured catalog.
fn open_catalog(path: &Path, quiet: bool, verbose: u8) -> Result<CatalogService<SqliteEntityStore>> {
    let mut settings = Config::load_or_default(path)?;
    if quiet {
        settings.logging.level = "error".into();
    }
    settings.init_logging(verbose > 0);
    debug!(config = %path.display(), "Configuration loaded");

    bootstrap::build_catalog(&settings)
}

use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod check_config;
mod migrate;

#[derive(Debug, Error)]
#[error("Failed to run command")]
pub struct CliError;

/// Command line options for usergraph.
#[derive(Debug, Parser)]
#[command(about = "Maintenance tools for the usergraph database", version, author)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        let config = usergraph::config::Server::load().change_context(CliError)?;
        usergraph::logging::init(&config.logging).change_context(CliError)?;

        match self.subcommand {
            Subcommand::Migrate(args) => self::migrate::run(&args, config),
            Subcommand::CheckConfig(args) => {
                self::check_config::run(&args, &config);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Migrate(self::migrate::MigrateCommand),
    CheckConfig(self::check_config::CheckConfigCommand),
}

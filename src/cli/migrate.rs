use clap::Parser;
use error_stack::{Result, ResultExt};
use usergraph::{config, App};

use super::CliError;

/// Apply pending migrations to the primary database
#[derive(Debug, Parser)]
pub struct MigrateCommand {
    /// Wait until the database accepts connections before migrating.
    #[clap(long)]
    pub wait: bool,
}

pub fn run(args: &MigrateCommand, config: config::Server) -> Result<(), CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .change_context(CliError)
        .attach_printable("could not build tokio runtime")?
        .block_on(async {
            let app = App::new(config).await.change_context(CliError)?;
            if args.wait {
                app.db.wait_until_healthy().await.change_context(CliError)?;
            }
            app.migrate().await.change_context(CliError)
        })
}

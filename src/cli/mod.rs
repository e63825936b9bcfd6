//! Command Line Interface module

pub mod args;
pub mod commands;

pub use args::*;

use anyhow::Result;

/// Main CLI application runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    crate::utils::logging::init_cli_logging(cli.verbose, cli.quiet)?;

    commands::execute_command(cli.command.clone(), &cli).await
}

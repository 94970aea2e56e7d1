use anyhow::Result;
use clap::Parser;

use next_task::cli::Cli;
use next_task::config::Config;
use next_task::{handlers, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;
    handlers::run(cli.command, config).await
}

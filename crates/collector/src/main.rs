use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use collector::cli::{self, Cli};
use collector::{RestDataSource, SharedSource};
use common::{config::AppConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_logging(args.verbose);
    let config = AppConfig::load()?;

    let mut stdout = std::io::stdout().lock();
    cli::run(
        args,
        || RestDataSource::from_config(&config.github).map(|s| Arc::new(s) as SharedSource),
        &mut stdout,
    )
    .await?;
    Ok(())
}

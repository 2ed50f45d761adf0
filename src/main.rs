use anyhow::Result;
use clap::Parser;
use log::debug;
use ride_compare::cli;
use ride_compare::config::{Args, Config};
use ride_compare::log_format;

#[tokio::main]
async fn main() -> Result<()> {
    log_format::init()?;

    let args = Args::parse();
    debug!("Current working dir: {:?}", std::env::current_dir());

    let config = Config::load(&args.config)?;
    cli::run(args.command, config).await
}

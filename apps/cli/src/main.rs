//! # billsplit
//!
//! Entry point for the bill-splitting CLI. See the library docs for usage.

use anyhow::Context;
use billsplit_cli::config::Settings;
use billsplit_cli::{execute, Cli, Command};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = Settings::load(cli.config.as_deref()).context("loading settings")?;

    match &cli.command {
        Command::Calculate(args) => {
            let settings = args.settings(&base);
            init_tracing(&settings);

            let outcome = execute(args, &settings).await?;
            println!("{}", outcome.output);
            if outcome.exit_code != 0 {
                std::process::exit(outcome.exit_code);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries the result.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

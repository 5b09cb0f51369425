//! ghw - CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghw::{Cli, Config, GhCli, dispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    // gh must be usable before anything is routed
    let gh = GhCli::locate().await?;
    let config = Config::from_env();

    let mut stdout = io::stdout().lock();
    dispatch(cli, &config, &gh, &mut stdout).await
}

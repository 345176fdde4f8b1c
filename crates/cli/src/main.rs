//! # DNS Kraken
//!
//! Command-line entry point: parses arguments, loads the configuration and
//! runs one reconnaissance subcommand.

mod bootstrap;
mod cli;
mod commands;
mod di;
mod output;

use clap::Parser;
use cli::Cli;
use di::Services;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, letting in-flight queries finish");
            on_interrupt.cancel();
        }
    });

    let services = Services::new(config, cancel);
    commands::run(&services, &cli.command).await
}

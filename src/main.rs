//! dirwatcher - long-running directory monitor
//!
//! Entry point for the dirwatcher binary.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dirwatcher::config::Cli;
use dirwatcher::observability::init_tracing;
use dirwatcher::shutdown::spawn_signal_listener;
use dirwatcher::watcher::{DirWatcher, WatcherConfig};
use dirwatcher::{Config, Result};
use tokio_util::sync::CancellationToken;

/// Exit status for missing or invalid arguments.
const USAGE_EXIT_CODE: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    let config = Config::from(cli);
    if let Err(e) = config.validate() {
        let _ = Cli::command()
            .error(ErrorKind::ValueValidation, e)
            .print();
        return ExitCode::from(USAGE_EXIT_CODE);
    }

    if let Err(e) = init_tracing(&config.log_level, config.log_json) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dirwatcher failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<()> {
    let watcher_config = WatcherConfig::from_config(config)?;

    tracing::info!(
        "dirwatcher v{} started at {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%a %b %e %H:%M:%S %Y")
    );
    tracing::debug!(?watcher_config, "Configuration loaded");

    let mut watcher = DirWatcher::new(watcher_config);
    let cancel = CancellationToken::new();
    let listener = spawn_signal_listener(cancel.clone());

    watcher.run(&cancel).await;

    let signal = listener.await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Signal listener task failed");
        None
    });
    watcher.stop(signal);

    Ok(())
}

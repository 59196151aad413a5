//! # Flightcast
//!
//! Entry point for the `flightcast` binary.
//!
//! Log verbosity follows `RUST_LOG`, defaulting to info for this crate and
//! the HTTP trace layer. Logs go to stderr so `predict --json` output stays
//! clean on stdout.

use clap::Parser;
use flightcast::cli::{self, Cli};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "flightcast=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

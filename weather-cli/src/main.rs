//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Rendering page states to the terminal

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod geolocation;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // stderr, so log lines never mix with rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

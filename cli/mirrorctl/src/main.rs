//! mirrorctl (mirror) - CLI for the Dockerfile image mirror.
//!
//! Drives the three reconciliation stages as separate idempotent
//! subcommands, the way CI invokes them: generate-versions, generate-pins,
//! harvest-digests.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays machine-consumable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Run the command
    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

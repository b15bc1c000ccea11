//! repohealth - GitHub repository health dashboard CLI

use anyhow::Result;
use clap::Parser;
use repohealth::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("repohealth={}", cli.log_level)));

    // Initialize logging (stderr keeps stdout clean for reports)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}

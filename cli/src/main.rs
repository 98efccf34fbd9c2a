//! Fallback thumbnail manager
//!
//! Inspects and edits the slug-to-image mapping table and shows how the
//! resolver is configured.
//!
//! Usage:
//!   fallthumb --db site.db list
//!   fallthumb --db site.db add --slug news 42

use anyhow::Result;
use clap::Parser;
use fallthumb_cli::{Cli, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

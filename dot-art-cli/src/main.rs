//! # dot-art
//!
//! ```bash
//! # Preview the whole picture as dots
//! dot-art photo.jpg -o dots.png
//!
//! # Coarser grid, fewer bands, square dots
//! dot-art photo.jpg -o dots.png --grid 24 --bands 6 --style square
//!
//! # Print-ready A4 sheets with 15mm cells
//! dot-art photo.jpg -o sheets.png --pixel-size-mm 15 --all-sheets
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=dot_art=debug`).

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dot_art_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    dot_art_cli::run(&cli)
}

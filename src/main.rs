//! Slidereel
//!
//! Assembles a narrated slideshow video from numbered still images and
//! audio clips, one final video per language variant.
//!
//! # Usage
//!
//! ```bash
//! slidereel ./lesson01
//! slidereel ./lesson01 --layout multi --spanish-dir /videos/es
//! ```

use anyhow::Result;
use clap::Parser;

use slidereel_cli::adapters::init_logging;
use slidereel_cli::cli::{commands, Cli};

/// Main entry point for the slidereel application
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_format)?;
    tracing::debug!("Starting slidereel");

    commands::run(&cli)
}

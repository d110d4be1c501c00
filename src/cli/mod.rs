//! CLI module for slidereel
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

use crate::adapters::LogFormat;
use crate::config_initialization::{ConfigOverrides, Layout};

pub mod commands;

/// Slidereel
///
/// Turns numbered slide images and narration clips into one video per
/// language variant, using FFmpeg for all encoding work.
#[derive(Parser, Debug)]
#[command(name = "slidereel")]
#[command(about = "Slidereel - Narrated slideshow videos from numbered images and audio")]
#[command(version)]
pub struct Cli {
    /// Directory holding image_<i>.png and audio_<i>[_suffix].wav
    #[arg(default_value = ".")]
    pub content_dir: PathBuf,

    /// Pipeline configuration
    #[arg(long, value_enum, env = "SLIDEREEL_LAYOUT")]
    pub layout: Option<Layout>,

    /// TOML configuration file
    #[arg(long, env = "SLIDEREEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// FFmpeg binary
    #[arg(long, env = "SLIDEREEL_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Output directory for the default variant (multi layout)
    #[arg(long, env = "SLIDEREEL_MANDARIN_DIR")]
    pub mandarin_dir: Option<PathBuf>,

    /// Output directory for the _es variant (multi layout)
    #[arg(long, env = "SLIDEREEL_SPANISH_DIR")]
    pub spanish_dir: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "info", env = "SLIDEREEL_LOG_LEVEL")]
    pub log_level: String,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Configuration values given on the command line or via environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            layout: self.layout,
            ffmpeg: self.ffmpeg.clone(),
            mandarin_dir: self.mandarin_dir.clone(),
            spanish_dir: self.spanish_dir.clone(),
        }
    }
}

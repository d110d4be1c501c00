//! Slidereel Library
//!
//! Batch pipeline that renders one FFmpeg segment per image/audio pair and
//! concatenates the segments losslessly, per language variant.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::LanguageOrchestrator;
pub use config_initialization::{Layout, PipelineConfig};
pub use domain::errors::{PipelineError, PipelineResult};
pub use domain::model::{RunReport, Variant, VariantOutcome, VariantStatus};

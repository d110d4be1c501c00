//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults. Clap resolves the first two
//! (every flag has an `env` fallback), so this module only layers the
//! resulting overrides on top of the optional TOML file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::exec_ffmpeg::DEFAULT_FFMPEG;
use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter, VariantEntry};
use crate::domain::errors::*;
use crate::domain::model::{Variant, OUTPUT_DIR};
use crate::domain::rules::validate_suffix;

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Default variant only, `output/final_video.mp4`, first failure aborts
    #[default]
    Single,
    /// Every present variant, timestamped files in per-variant directories
    Multi,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub layout: Option<Layout>,
    pub ffmpeg: Option<PathBuf>,
    pub mandarin_dir: Option<PathBuf>,
    pub spanish_dir: Option<PathBuf>,
}

/// Fully resolved pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub layout: Layout,
    pub ffmpeg: PathBuf,
    pub variants: Vec<VariantEntry>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Single,
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG),
            variants: default_variants(),
        }
    }
}

fn default_variants() -> Vec<VariantEntry> {
    [Variant::mandarin(), Variant::spanish()]
        .into_iter()
        .map(|v| VariantEntry {
            name: v.name,
            suffix: v.suffix,
            output_dir: None,
        })
        .collect()
}

impl PipelineConfig {
    /// Layer a file config and overrides over the defaults
    pub fn resolve(file: FileConfig, overrides: ConfigOverrides) -> Result<Self, PipelineError> {
        let mut config = Self::default();

        if let Some(layout) = file.layout {
            config.layout = layout;
        }
        if let Some(ffmpeg) = file.ffmpeg {
            config.ffmpeg = ffmpeg;
        }
        if let Some(variants) = file.variants {
            config.variants = variants;
        }

        if let Some(layout) = overrides.layout {
            config.layout = layout;
        }
        if let Some(ffmpeg) = overrides.ffmpeg {
            config.ffmpeg = ffmpeg;
        }
        if let Some(dir) = overrides.mandarin_dir {
            config.entry_mut("")?.output_dir = Some(dir);
        }
        if let Some(dir) = overrides.spanish_dir {
            config.entry_mut(&Variant::spanish().suffix)?.output_dir = Some(dir);
        }

        config.validate()?;
        Ok(config)
    }

    fn entry_mut(&mut self, suffix: &str) -> Result<&mut VariantEntry, PipelineError> {
        self.variants
            .iter_mut()
            .find(|v| v.suffix == suffix)
            .ok_or_else(|| {
                PipelineError::Config(format!("No variant with suffix '{}' is configured", suffix))
            })
    }

    /// Check the variant registry
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut seen = HashSet::new();
        for entry in &self.variants {
            validate_suffix(&entry.suffix)?;
            if entry.name.trim().is_empty() {
                return Err(PipelineError::Config(format!(
                    "Variant with suffix '{}' has an empty name",
                    entry.suffix
                )));
            }
            if !seen.insert(entry.suffix.as_str()) {
                return Err(PipelineError::Config(format!(
                    "Variant suffix '{}' is configured more than once",
                    entry.suffix
                )));
            }
        }
        if !seen.contains("") {
            return Err(PipelineError::Config(
                "Exactly one variant must use the empty (default) suffix".to_string(),
            ));
        }
        // A file ending in `_x_es` would otherwise count for both `_es` and `_x_es`
        for outer in seen.iter().filter(|s| !s.is_empty()) {
            if let Some(inner) = seen
                .iter()
                .find(|s| !s.is_empty() && *s != outer && outer.ends_with(**s))
            {
                return Err(PipelineError::Config(format!(
                    "Variant suffix '{}' ends with another variant's suffix '{}'",
                    outer, inner
                )));
            }
        }
        if self.ffmpeg.as_os_str().is_empty() {
            return Err(PipelineError::Config("FFmpeg path is empty".to_string()));
        }
        Ok(())
    }

    /// Every registered variant, in registry order
    pub fn variants(&self) -> Vec<Variant> {
        self.variants
            .iter()
            .map(|e| Variant::new(e.name.clone(), e.suffix.clone()))
            .collect()
    }

    /// The variant with the empty suffix
    pub fn default_variant(&self) -> Variant {
        self.variants()
            .into_iter()
            .find(Variant::is_default)
            .unwrap_or_else(Variant::mandarin)
    }

    /// Suffixes of every registered variant
    pub fn known_suffixes(&self) -> Vec<String> {
        self.variants.iter().map(|e| e.suffix.clone()).collect()
    }

    /// Final output directory of a variant in the multi layout.
    ///
    /// Relative directories are taken relative to the content directory;
    /// unset ones default to `output/<lowercase name>`.
    pub fn output_dir_for(&self, variant: &Variant, content_dir: &Path) -> PathBuf {
        let configured = self
            .variants
            .iter()
            .find(|e| e.suffix == variant.suffix)
            .and_then(|e| e.output_dir.clone());

        match configured {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => content_dir.join(dir),
            None => content_dir
                .join(OUTPUT_DIR)
                .join(variant.name.to_lowercase()),
        }
    }

    /// Fail when two variants would write their timestamped outputs into the same directory
    pub fn check_output_dirs(&self, content_dir: &Path) -> Result<(), PipelineError> {
        let mut claimed: Vec<(PathBuf, Variant)> = Vec::new();
        for variant in self.variants() {
            let dir = self.output_dir_for(&variant, content_dir);
            if let Some((_, other)) = claimed.iter().find(|(d, _)| *d == dir) {
                return Err(PipelineError::Config(format!(
                    "{} and {} share the output directory {}",
                    other,
                    variant,
                    dir.display()
                )));
            }
            claimed.push((dir, variant));
        }
        Ok(())
    }
}

/// Build the configuration from an optional file plus CLI/env overrides
pub fn initialize_configuration(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<PipelineConfig, PipelineError> {
    info!("Initializing configuration hierarchy");

    let file = match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load(path)?
        }
        None => FileConfig::default(),
    };

    let config = PipelineConfig::resolve(file, overrides)?;
    info!(
        "Configuration: layout {:?}, ffmpeg '{}', {} variant(s)",
        config.layout,
        config.ffmpeg.display(),
        config.variants.len()
    );
    Ok(config)
}

// TOML config adapter - Pipeline configuration files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config_initialization::Layout;
use crate::domain::errors::*;

/// One entry of the variant registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantEntry {
    pub name: String,
    #[serde(default)]
    pub suffix: String,
    /// Final output directory in the multi layout
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Contents of a configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub ffmpeg: Option<PathBuf>,
    #[serde(default)]
    pub variants: Option<Vec<VariantEntry>>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from a TOML string
    pub fn parse(toml_content: &str) -> Result<FileConfig, PipelineError> {
        toml::from_str(toml_content)
            .map_err(|e| PipelineError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from file
    pub fn load(file_path: &Path) -> Result<FileConfig, PipelineError> {
        if !file_path.exists() {
            return Err(PipelineError::Config(format!(
                "Config file does not exist: {}",
                file_path.display()
            )));
        }

        let content =
            std::fs::read_to_string(file_path).map_err(|e| PipelineError::io(file_path, e))?;
        Self::parse(&content)
    }
}

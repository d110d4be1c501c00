// Domain errors - Error types for the pipeline layers

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage that invoked the transcoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStage {
    /// Rendering the segment for one index
    Segment(u32),
    /// Concatenating all segments of a variant
    Concat,
}

impl std::fmt::Display for ToolStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStage::Segment(index) => write!(f, "creating segment {}", index),
            ToolStage::Concat => write!(f, "concatenating segments"),
        }
    }
}

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Content directory does not exist
    #[error("Content directory does not exist: {path}. Pass an existing directory as the first argument")]
    ContentDirMissing { path: PathBuf },

    /// Content directory path is something other than a directory
    #[error("Content path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// No audio assets for any variant that was expected
    #[error("No audio files found (audio_*.wav) in content directory {path}")]
    NoAssets { path: PathBuf },

    /// Every index of a variant was skipped
    #[error("No segments were created for {variant}. Please check your input files")]
    NoSegmentsCreated { variant: String },

    /// Transcoder binary could not be found
    #[error("FFmpeg not found at '{binary}'. Install FFmpeg (e.g. `brew install ffmpeg` or `apt install ffmpeg`) or pass --ffmpeg <PATH>")]
    ToolNotFound { binary: PathBuf },

    /// Transcoder could not be started for another reason
    #[error("Failed to start '{binary}': {source}")]
    ToolSpawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transcoder exited unsuccessfully
    #[error("Error {stage}: FFmpeg exited with {status}\n{diagnostics}")]
    ToolFailed {
        stage: ToolStage,
        status: String,
        diagnostics: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Setup errors abort the whole run regardless of layout
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            PipelineError::ContentDirMissing { .. }
                | PipelineError::NotADirectory { .. }
                | PipelineError::ToolNotFound { .. }
                | PipelineError::ToolSpawn { .. }
                | PipelineError::Config(_)
        )
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

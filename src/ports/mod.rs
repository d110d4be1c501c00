// Ports - Interface definitions (contracts)

use std::path::PathBuf;

use crate::domain::errors::*;

#[cfg(test)]
pub mod fake;

/// Render one still-image segment with its narration track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentJob {
    pub image: PathBuf,
    pub audio: PathBuf,
    pub output: PathBuf,
}

/// Concatenate the segments listed in a manifest into one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatJob {
    pub manifest: PathBuf,
    pub output: PathBuf,
}

/// Exit status and captured diagnostics of one transcoder process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    pub stderr: String,
}

impl ToolOutput {
    /// Successful run with no diagnostics
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            success: true,
            stderr: String::new(),
        }
    }

    /// Failed run with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stderr: stderr.into(),
        }
    }

    /// Human readable exit status
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "termination by signal".to_string(),
        }
    }

    /// Last `max_lines` lines of stderr, where ffmpeg reports the actual failure
    pub fn diagnostic_tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self.stderr.trim_end().lines().collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n")
    }
}

/// Port for the external media transcoder.
///
/// Calls block until the process exits. A non-zero exit is reported as a
/// `ToolOutput` with `success == false`; `Err` is reserved for failing to
/// run the tool at all.
pub trait TranscodePort: Send + Sync {
    /// Loop the still image over the audio track into `job.output`
    fn render_segment(&self, job: &SegmentJob) -> Result<ToolOutput, PipelineError>;

    /// Stream-copy the manifest's segments into `job.output`
    fn concatenate(&self, job: &ConcatJob) -> Result<ToolOutput, PipelineError>;
}

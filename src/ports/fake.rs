//! Recording transcoder used by unit tests

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::errors::PipelineError;
use crate::ports::{ConcatJob, SegmentJob, ToolOutput, TranscodePort};

/// A call observed by [`RecordingTranscoder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Segment(SegmentJob),
    Concat(ConcatJob),
}

/// Transcoder double that writes placeholder files and records every call
#[derive(Default)]
pub struct RecordingTranscoder {
    calls: Mutex<Vec<Call>>,
    fail_outputs: Vec<String>,
    missing_binary: bool,
}

impl RecordingTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any job whose output file name equals `file_name`
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.fail_outputs.push(file_name.to_string());
        self
    }

    /// Behave as if the binary is not installed
    pub fn missing() -> Self {
        Self {
            missing_binary: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn segment_outputs(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Segment(job) => Some(job.output),
                Call::Concat(_) => None,
            })
            .collect()
    }

    pub fn concat_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Concat(_)))
            .count()
    }

    fn run(&self, call: Call, output: &Path) -> Result<ToolOutput, PipelineError> {
        if self.missing_binary {
            return Err(PipelineError::ToolNotFound {
                binary: PathBuf::from("ffmpeg"),
            });
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        let name = output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.fail_outputs.contains(&name) {
            return Ok(ToolOutput::failed(1, format!("{}: Invalid data found", name)));
        }

        std::fs::write(output, b"fake media payload").map_err(|e| PipelineError::io(output, e))?;
        Ok(ToolOutput::ok())
    }
}

impl TranscodePort for RecordingTranscoder {
    fn render_segment(&self, job: &SegmentJob) -> Result<ToolOutput, PipelineError> {
        self.run(Call::Segment(job.clone()), &job.output)
    }

    fn concatenate(&self, job: &ConcatJob) -> Result<ToolOutput, PipelineError> {
        self.run(Call::Concat(job.clone()), &job.output)
    }
}

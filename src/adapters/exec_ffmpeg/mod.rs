//! FFmpeg execution adapter
//!
//! Drives the `ffmpeg` command-line tool for segment rendering and
//! stream-copy concatenation. Each call spawns one process and waits for it.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Default binary looked up on `PATH`
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// FFmpeg-based execution adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    binary: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter for the given binary
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments for a still-image segment muxed with its narration
    pub fn segment_args(job: &SegmentJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(19);
        args.extend(["-loop", "1", "-i"].map(OsString::from));
        args.push(job.image.clone().into_os_string());
        args.push("-i".into());
        args.push(job.audio.clone().into_os_string());
        args.extend(
            [
                "-c:v",
                "libx264",
                "-tune",
                "stillimage",
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
                "-b:a",
                "192k",
                "-shortest",
                "-y",
            ]
            .map(OsString::from),
        );
        args.push(job.output.clone().into_os_string());
        args
    }

    /// Arguments for manifest-driven stream-copy concatenation
    pub fn concat_args(job: &ConcatJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-f", "concat", "-safe", "0", "-i"]
            .map(OsString::from)
            .to_vec();
        args.push(job.manifest.clone().into_os_string());
        args.extend(["-c", "copy", "-y"].map(OsString::from));
        args.push(job.output.clone().into_os_string());
        args
    }

    /// Spawn the binary, wait for it and capture its stderr
    fn invoke(&self, args: &[OsString]) -> Result<ToolOutput, PipelineError> {
        debug!("Running {} {:?}", self.binary.display(), args);

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PipelineError::ToolNotFound {
                    binary: self.binary.clone(),
                },
                _ => PipelineError::ToolSpawn {
                    binary: self.binary.clone(),
                    source: e,
                },
            })?;

        Ok(ToolOutput {
            code: output.status.code(),
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG)
    }
}

impl TranscodePort for FFmpegAdapter {
    fn render_segment(&self, job: &SegmentJob) -> Result<ToolOutput, PipelineError> {
        self.invoke(&Self::segment_args(job))
    }

    fn concatenate(&self, job: &ConcatJob) -> Result<ToolOutput, PipelineError> {
        self.invoke(&Self::concat_args(job))
    }
}

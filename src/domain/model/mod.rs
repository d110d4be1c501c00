// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config_initialization::Layout;
use crate::domain::rules::AUDIO_PREFIX;

/// Name of the intermediate directory under the content directory
pub const SEGMENTS_DIR: &str = "segments";
/// Name of the single-layout output directory under the content directory
pub const OUTPUT_DIR: &str = "output";
/// Static final file name used by the single layout
pub const FINAL_VIDEO_NAME: &str = "final_video.mp4";

/// A language-specific audio track set, distinguished by a filename suffix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: String,
    pub suffix: String,
}

impl Variant {
    /// Create a new variant
    pub fn new(name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: suffix.into(),
        }
    }

    /// The default (unsuffixed) variant
    pub fn mandarin() -> Self {
        Self::new("Mandarin", "")
    }

    /// The `_es` variant
    pub fn spanish() -> Self {
        Self::new("Spanish", "_es")
    }

    pub fn is_default(&self) -> bool {
        self.suffix.is_empty()
    }

    /// `audio_<i><suffix>.wav`
    pub fn audio_file_name(&self, index: u32) -> String {
        format!("{}{}{}.wav", AUDIO_PREFIX, index, self.suffix)
    }

    /// `segment_<i>.mp4` or `segment<suffix>_<i>.mp4`
    pub fn segment_file_name(&self, index: u32) -> String {
        format!("segment{}_{}.mp4", self.suffix, index)
    }

    /// `concat_list<suffix>.txt`
    pub fn manifest_file_name(&self) -> String {
        format!("concat_list{}.txt", self.suffix)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suffix.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.suffix)
        }
    }
}

/// `image_<i>.png`, shared by every variant
pub fn image_file_name(index: u32) -> String {
    format!("image_{}.png", index)
}

/// Resolved locations of inputs and intermediates for one content directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLayout {
    content_dir: PathBuf,
    segments_dir: PathBuf,
}

impl ContentLayout {
    /// Build a layout rooted at an absolute content directory
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        let content_dir = content_dir.into();
        let segments_dir = content_dir.join(SEGMENTS_DIR);
        Self {
            content_dir,
            segments_dir,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn segments_dir(&self) -> &Path {
        &self.segments_dir
    }

    pub fn image_path(&self, index: u32) -> PathBuf {
        self.content_dir.join(image_file_name(index))
    }

    pub fn audio_path(&self, variant: &Variant, index: u32) -> PathBuf {
        self.content_dir.join(variant.audio_file_name(index))
    }

    pub fn segment_path(&self, variant: &Variant, index: u32) -> PathBuf {
        self.segments_dir.join(variant.segment_file_name(index))
    }

    pub fn manifest_path(&self, variant: &Variant) -> PathBuf {
        self.segments_dir.join(variant.manifest_file_name())
    }

    /// Asset pair for an index
    pub fn asset_pair(&self, variant: &Variant, index: u32) -> AssetPair {
        AssetPair {
            index,
            image: self.image_path(index),
            audio: self.audio_path(variant, index),
        }
    }
}

/// Image and audio inputs for one segment index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPair {
    pub index: u32,
    pub image: PathBuf,
    pub audio: PathBuf,
}

/// A rendered segment video for one asset pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentArtifact {
    pub index: u32,
    pub path: PathBuf,
}

/// Segments produced for a variant, in ascending index order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentBatch {
    pub artifacts: Vec<SegmentArtifact>,
    pub skipped: Vec<u32>,
}

impl SegmentBatch {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.path.clone()).collect()
    }
}

/// How the final output of a variant is named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNaming {
    /// `final_video.mp4`
    Static,
    /// `<YYYYMMDD_HHMMSS>.mp4`, one stamp for the whole run
    Timestamped(String),
}

impl OutputNaming {
    pub fn file_name(&self) -> String {
        match self {
            OutputNaming::Static => FINAL_VIDEO_NAME.to_string(),
            OutputNaming::Timestamped(stamp) => format!("{}.mp4", stamp),
        }
    }
}

/// Where a variant's final video is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub naming: OutputNaming,
}

impl OutputTarget {
    pub fn new(dir: impl Into<PathBuf>, naming: OutputNaming) -> Self {
        Self {
            dir: dir.into(),
            naming,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(self.naming.file_name())
    }
}

/// Finished concatenation of one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalOutput {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Result of attempting one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VariantStatus {
    Completed {
        output: PathBuf,
        segments: usize,
        skipped: Vec<u32>,
        size_bytes: u64,
    },
    Failed {
        reason: String,
    },
}

/// Per-variant entry of the run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantOutcome {
    pub variant: Variant,
    #[serde(flatten)]
    pub status: VariantStatus,
}

impl VariantOutcome {
    pub fn completed(variant: Variant, batch: &SegmentBatch, output: FinalOutput) -> Self {
        Self {
            variant,
            status: VariantStatus::Completed {
                output: output.path,
                segments: batch.artifacts.len(),
                skipped: batch.skipped.clone(),
                size_bytes: output.size_bytes,
            },
        }
    }

    pub fn failed(variant: Variant, reason: impl Into<String>) -> Self {
        Self {
            variant,
            status: VariantStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, VariantStatus::Completed { .. })
    }
}

/// Aggregated result of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub content_dir: PathBuf,
    pub layout: Layout,
    pub outcomes: Vec<VariantOutcome>,
}

impl RunReport {
    pub fn new(content_dir: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            content_dir: content_dir.into(),
            layout,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: VariantOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// True when at least one variant ran and none failed
    pub fn all_succeeded(&self) -> bool {
        !self.outcomes.is_empty() && self.failed_count() == 0
    }
}

#[cfg(test)]
mod tests;

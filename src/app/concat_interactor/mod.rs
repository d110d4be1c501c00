// Concat interactor - Writes the manifest and merges segments losslessly

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::Utils;

const DIAGNOSTIC_LINES: usize = 20;

/// Render the manifest text: one `file '<path>'` line per segment, in order.
///
/// A `'` inside a path is written as `'\''` (close, escaped quote, reopen).
pub fn manifest_contents(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|p| format!("file '{}'\n", p.display().to_string().replace('\'', "'\\''")))
        .collect()
}

/// Interactor for stream-copy concatenation
pub struct ConcatPlanner {
    transcoder: Arc<dyn TranscodePort>,
}

impl ConcatPlanner {
    /// Create new planner with injected transcoder
    pub fn new(transcoder: Arc<dyn TranscodePort>) -> Self {
        Self { transcoder }
    }

    /// Write (overwrite) the variant's manifest
    pub fn write_manifest(
        &self,
        layout: &ContentLayout,
        variant: &Variant,
        batch: &SegmentBatch,
    ) -> Result<PathBuf, PipelineError> {
        let manifest = layout.manifest_path(variant);
        fs::write(&manifest, manifest_contents(&batch.paths()))
            .map_err(|e| PipelineError::io(&manifest, e))?;
        info!(
            "Concatenation list created with {} segments",
            batch.artifacts.len()
        );
        Ok(manifest)
    }

    /// Write the manifest, then merge the segments into `target`
    pub fn concatenate(
        &self,
        layout: &ContentLayout,
        variant: &Variant,
        batch: &SegmentBatch,
        target: &OutputTarget,
    ) -> Result<FinalOutput, PipelineError> {
        let manifest = self.write_manifest(layout, variant, batch)?;

        info!("Concatenating all segments into final video for {}", variant);
        let job = ConcatJob {
            manifest,
            output: target.path(),
        };
        let output = self.transcoder.concatenate(&job)?;

        if !output.success {
            error!("Error during concatenation for {}", variant);
            debug!("FFmpeg stderr:\n{}", output.stderr);
            return Err(PipelineError::ToolFailed {
                stage: ToolStage::Concat,
                status: output.status_text(),
                diagnostics: output.diagnostic_tail(DIAGNOSTIC_LINES),
            });
        }

        let size_bytes = file_size(&job.output)?;
        info!("Final video created: {}", job.output.display());
        info!("File size: {}", Utils::format_file_size(size_bytes));

        Ok(FinalOutput {
            path: job.output,
            size_bytes,
        })
    }
}

fn file_size(path: &Path) -> Result<u64, PipelineError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| PipelineError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fake::{Call, RecordingTranscoder};
    use tempfile::TempDir;

    fn batch_of(layout: &ContentLayout, variant: &Variant, indices: &[u32]) -> SegmentBatch {
        SegmentBatch {
            artifacts: indices
                .iter()
                .map(|i| SegmentArtifact {
                    index: *i,
                    path: layout.segment_path(variant, *i),
                })
                .collect(),
            skipped: vec![],
        }
    }

    #[test]
    fn test_manifest_contents_format() {
        let text = manifest_contents(&[
            PathBuf::from("/c/segments/segment_1.mp4"),
            PathBuf::from("/c/segments/segment_3.mp4"),
        ]);
        assert_eq!(
            text,
            "file '/c/segments/segment_1.mp4'\nfile '/c/segments/segment_3.mp4'\n"
        );
        assert_eq!(manifest_contents(&[]), "");
    }

    #[test]
    fn test_manifest_escapes_single_quotes() {
        let text = manifest_contents(&[PathBuf::from("/c/Ana's Lessons/segments/segment_1.mp4")]);
        assert_eq!(
            text,
            "file '/c/Ana'\\''s Lessons/segments/segment_1.mp4'\n"
        );
    }

    #[test]
    fn test_concatenate_writes_manifest_and_output() {
        let temp = TempDir::new().unwrap();
        let layout = ContentLayout::new(temp.path());
        fs::create_dir_all(layout.segments_dir()).unwrap();
        let out_dir = temp.path().join("output");
        fs::create_dir_all(&out_dir).unwrap();

        let variant = Variant::spanish();
        let batch = batch_of(&layout, &variant, &[1, 3]);
        let fake = Arc::new(RecordingTranscoder::new());
        let planner = ConcatPlanner::new(fake.clone());

        let target = OutputTarget::new(&out_dir, OutputNaming::Static);
        let output = planner
            .concatenate(&layout, &variant, &batch, &target)
            .unwrap();

        assert_eq!(output.path, out_dir.join("final_video.mp4"));
        assert!(output.size_bytes > 0);

        let manifest = fs::read_to_string(layout.segments_dir().join("concat_list_es.txt")).unwrap();
        let lines: Vec<&str> = manifest.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("segment_es_1.mp4'"));
        assert!(lines[1].ends_with("segment_es_3.mp4'"));
        assert!(lines.iter().all(|l| l.starts_with("file '/")));

        assert_eq!(
            fake.calls(),
            vec![Call::Concat(ConcatJob {
                manifest: layout.manifest_path(&variant),
                output: out_dir.join("final_video.mp4"),
            })]
        );
    }

    #[test]
    fn test_manifest_is_overwritten() {
        let temp = TempDir::new().unwrap();
        let layout = ContentLayout::new(temp.path());
        fs::create_dir_all(layout.segments_dir()).unwrap();
        let variant = Variant::mandarin();
        fs::write(layout.manifest_path(&variant), "file '/stale.mp4'\n".repeat(5)).unwrap();

        let planner = ConcatPlanner::new(Arc::new(RecordingTranscoder::new()));
        planner
            .write_manifest(&layout, &variant, &batch_of(&layout, &variant, &[2]))
            .unwrap();

        let manifest = fs::read_to_string(layout.manifest_path(&variant)).unwrap();
        assert_eq!(manifest.lines().count(), 1);
        assert!(!manifest.contains("stale"));
    }

    #[test]
    fn test_concat_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let layout = ContentLayout::new(temp.path());
        fs::create_dir_all(layout.segments_dir()).unwrap();
        let variant = Variant::mandarin();

        let fake = Arc::new(RecordingTranscoder::new().failing_on("final_video.mp4"));
        let planner = ConcatPlanner::new(fake);
        let target = OutputTarget::new(temp.path(), OutputNaming::Static);

        let err = planner
            .concatenate(&layout, &variant, &batch_of(&layout, &variant, &[1]), &target)
            .unwrap_err();
        match err {
            PipelineError::ToolFailed { stage, diagnostics, .. } => {
                assert_eq!(stage, ToolStage::Concat);
                assert!(diagnostics.contains("Invalid data found"));
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }
}

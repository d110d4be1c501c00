// Segment interactor - Renders one video segment per asset pair

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Lines of transcoder stderr carried in a failure message
const DIAGNOSTIC_LINES: usize = 20;

/// Interactor for segment rendering
pub struct SegmentBuilder {
    transcoder: Arc<dyn TranscodePort>,
}

impl SegmentBuilder {
    /// Create new segment builder with injected transcoder
    pub fn new(transcoder: Arc<dyn TranscodePort>) -> Self {
        Self { transcoder }
    }

    /// Render segments for indices `1..=max_index` of a variant.
    ///
    /// Indices missing their image or audio are skipped with a warning.
    /// The first transcoder failure aborts the variant; segments already
    /// rendered stay on disk.
    pub fn build(
        &self,
        layout: &ContentLayout,
        variant: &Variant,
        max_index: u32,
    ) -> Result<SegmentBatch, PipelineError> {
        info!("Creating individual video segments for {}", variant);
        let mut batch = SegmentBatch::default();

        for index in 1..=max_index {
            let pair = layout.asset_pair(variant, index);

            if !pair.image.exists() {
                warn!(
                    "{} not found, skipping segment {}",
                    file_label(&pair.image),
                    index
                );
                batch.skipped.push(index);
                continue;
            }
            if !pair.audio.exists() {
                warn!(
                    "{} not found, skipping segment {}",
                    file_label(&pair.audio),
                    index
                );
                batch.skipped.push(index);
                continue;
            }

            info!("Creating segment {}/{}", index, max_index);
            let job = SegmentJob {
                image: pair.image,
                audio: pair.audio,
                output: layout.segment_path(variant, index),
            };
            let output = self.transcoder.render_segment(&job)?;

            if !output.success {
                error!("Error creating segment {} for {}", index, variant);
                debug!("FFmpeg stderr:\n{}", output.stderr);
                // A half-written file must not pass for this index's artifact
                if job.output.exists() {
                    if let Err(e) = std::fs::remove_file(&job.output) {
                        warn!("Could not remove partial {}: {}", job.output.display(), e);
                    }
                }
                return Err(PipelineError::ToolFailed {
                    stage: ToolStage::Segment(index),
                    status: output.status_text(),
                    diagnostics: output.diagnostic_tail(DIAGNOSTIC_LINES),
                });
            }

            info!("Segment {} created successfully", index);
            batch.artifacts.push(SegmentArtifact {
                index,
                path: job.output,
            });
        }

        if batch.artifacts.is_empty() {
            error!("No segments were created for {}", variant);
            return Err(PipelineError::NoSegmentsCreated {
                variant: variant.to_string(),
            });
        }

        Ok(batch)
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

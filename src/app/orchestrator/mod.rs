// Language orchestrator - Runs the pipeline for every language variant

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::app::concat_interactor::ConcatPlanner;
use crate::app::scan_interactor::AssetScanner;
use crate::app::segment_interactor::SegmentBuilder;
use crate::config_initialization::{Layout, PipelineConfig};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::{path, time};

/// Interactor for a whole run over one content directory
pub struct LanguageOrchestrator {
    config: PipelineConfig,
    scanner: AssetScanner,
    builder: SegmentBuilder,
    planner: ConcatPlanner,
}

impl LanguageOrchestrator {
    /// Create new orchestrator with injected transcoder
    pub fn new(config: PipelineConfig, transcoder: Arc<dyn TranscodePort>) -> Self {
        let scanner = AssetScanner::new(config.known_suffixes());
        Self {
            config,
            scanner,
            builder: SegmentBuilder::new(Arc::clone(&transcoder)),
            planner: ConcatPlanner::new(transcoder),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline, stamping multi-layout outputs with the current time
    pub fn run(&self, content_dir: &Path) -> Result<RunReport, PipelineError> {
        self.run_with_stamp(content_dir, &time::current_run_stamp())
    }

    /// Run the pipeline with an explicit `YYYYMMDD_HHMMSS` stamp.
    ///
    /// `Err` means the run aborted. In the multi layout, per-variant
    /// failures are recorded in the report instead.
    pub fn run_with_stamp(
        &self,
        content_dir: &Path,
        stamp: &str,
    ) -> Result<RunReport, PipelineError> {
        let layout = self.prepare(content_dir)?;
        info!("Starting video creation process");
        info!("Content directory: {}", layout.content_dir().display());

        match self.config.layout {
            Layout::Single => self.run_single(&layout),
            Layout::Multi => self.run_multi(&layout, stamp),
        }
    }

    /// Validate the content directory and create every directory the layout writes to
    fn prepare(&self, content_dir: &Path) -> Result<ContentLayout, PipelineError> {
        let content_dir =
            path::absolutize(content_dir).map_err(|e| PipelineError::io(content_dir, e))?;
        if !content_dir.exists() {
            return Err(PipelineError::ContentDirMissing { path: content_dir });
        }
        if !content_dir.is_dir() {
            return Err(PipelineError::NotADirectory { path: content_dir });
        }

        let layout = ContentLayout::new(content_dir);
        let mut dirs = vec![layout.segments_dir().to_path_buf()];
        match self.config.layout {
            Layout::Single => dirs.push(layout.content_dir().join(OUTPUT_DIR)),
            Layout::Multi => {
                self.config.check_output_dirs(layout.content_dir())?;
                dirs.extend(
                    self.config
                        .variants()
                        .iter()
                        .map(|v| self.config.output_dir_for(v, layout.content_dir())),
                )
            }
        }
        for dir in dirs {
            path::ensure_dir(&dir).map_err(|e| PipelineError::io(&dir, e))?;
        }

        Ok(layout)
    }

    fn run_single(&self, layout: &ContentLayout) -> Result<RunReport, PipelineError> {
        let variant = self.config.default_variant();
        let max_index = self
            .scanner
            .max_segment_index(layout.content_dir(), &variant)?;
        if max_index == 0 {
            return Err(PipelineError::NoAssets {
                path: layout.content_dir().to_path_buf(),
            });
        }
        info!("Found {} segment(s)", max_index);

        let target = OutputTarget::new(layout.content_dir().join(OUTPUT_DIR), OutputNaming::Static);
        let outcome = self.run_variant(layout, &variant, max_index, &target)?;

        let mut report = RunReport::new(layout.content_dir(), Layout::Single);
        report.push(outcome);
        Ok(report)
    }

    fn run_multi(&self, layout: &ContentLayout, stamp: &str) -> Result<RunReport, PipelineError> {
        let mut report = RunReport::new(layout.content_dir(), Layout::Multi);
        let naming = OutputNaming::Timestamped(stamp.to_string());

        for variant in self.config.variants() {
            let max_index = match self
                .scanner
                .max_segment_index(layout.content_dir(), &variant)
            {
                Ok(max_index) => max_index,
                Err(e) => {
                    error!("Failed to scan assets for {}: {}", variant, e);
                    report.push(VariantOutcome::failed(variant, e.to_string()));
                    continue;
                }
            };
            if max_index == 0 {
                info!("No audio files for {}, skipping", variant);
                continue;
            }
            info!("Processing {}: found {} segment(s)", variant, max_index);

            let target = OutputTarget::new(
                self.config.output_dir_for(&variant, layout.content_dir()),
                naming.clone(),
            );
            match self.run_variant(layout, &variant, max_index, &target) {
                Ok(outcome) => report.push(outcome),
                Err(e) if e.is_setup() => return Err(e),
                Err(e) => {
                    error!("{} failed: {}", variant, e);
                    report.push(VariantOutcome::failed(variant, e.to_string()));
                }
            }
        }

        if report.outcomes.is_empty() {
            return Err(PipelineError::NoAssets {
                path: layout.content_dir().to_path_buf(),
            });
        }
        if report.failed_count() > 0 {
            warn!(
                "{} of {} variant(s) failed",
                report.failed_count(),
                report.outcomes.len()
            );
        }
        Ok(report)
    }

    fn run_variant(
        &self,
        layout: &ContentLayout,
        variant: &Variant,
        max_index: u32,
        target: &OutputTarget,
    ) -> Result<VariantOutcome, PipelineError> {
        let batch = self.builder.build(layout, variant, max_index)?;
        let output = self.planner.concatenate(layout, variant, &batch, target)?;
        info!("{} complete", variant);
        Ok(VariantOutcome::completed(variant.clone(), &batch, output))
    }
}

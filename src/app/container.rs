use std::sync::Arc;

use crate::adapters::FFmpegAdapter;
use crate::app::orchestrator::LanguageOrchestrator;
use crate::config_initialization::PipelineConfig;
use crate::ports::TranscodePort;

pub trait AppContainer {
    fn orchestrator(&self) -> Arc<LanguageOrchestrator>;
}

/// Wires the orchestrator to the ffmpeg adapter named in the configuration
pub struct DefaultAppContainer {
    orchestrator: Arc<LanguageOrchestrator>,
}

impl DefaultAppContainer {
    pub fn new(config: PipelineConfig) -> Self {
        let transcoder = Arc::new(FFmpegAdapter::new(config.ffmpeg.clone()));
        Self::with_transcoder(config, transcoder)
    }

    /// Wire with any transcoder implementation
    pub fn with_transcoder(config: PipelineConfig, transcoder: Arc<dyn TranscodePort>) -> Self {
        Self {
            orchestrator: Arc::new(LanguageOrchestrator::new(config, transcoder)),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn orchestrator(&self) -> Arc<LanguageOrchestrator> {
        Arc::clone(&self.orchestrator)
    }
}

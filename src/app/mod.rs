// Application layer - Use case interactors

pub mod concat_interactor;
pub mod container;
pub mod orchestrator;
pub mod scan_interactor;
pub mod segment_interactor;

// Re-export interactors
pub use concat_interactor::ConcatPlanner;
pub use orchestrator::LanguageOrchestrator;
pub use scan_interactor::AssetScanner;
pub use segment_interactor::SegmentBuilder;

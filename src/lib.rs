// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod classifier;
pub mod compliance;
pub mod config;
pub mod dedup;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod reports;
pub mod utils;

pub use classifier::SeverityClassifier;
pub use compliance::{ControlMapper, ControlScaffold, RiskAggregator, ScaffoldControl};
pub use config::{ClassificationConfig, Config, PipelineConfig, ReportsConfig, SlaConfig};
pub use dedup::FindingDeduplicator;
pub use error::{PipelineError, Result};
pub use exporter::{CsvExporter, ExportManifest, JsonExporter};
pub use extractor::{detect_source_kind, ReconExtractor};
pub use models::{
    ClassifiedFinding, ComplianceRow, CoverageStatus, Finding, FindingCategory, FindingStatus,
    RawFact, RiskEntry, Severity, SourceKind,
};
pub use normalizer::FindingNormalizer;
pub use pipeline::{PipelineOrchestrator, PipelineOutput, PipelineStats, ProgressTracker};
pub use reports::{ReportScanner, ScannedReport};

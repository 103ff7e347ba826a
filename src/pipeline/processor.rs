// file: src/pipeline/processor.rs
// description: converts one raw report file into normalized findings
// reference: reads text, detects the source kind, runs extraction

use crate::error::{PipelineError, Result};
use crate::extractor::{detect_source_kind, ReconExtractor};
use crate::models::{Finding, SourceKind};
use crate::normalizer::FindingNormalizer;
use crate::reports::ScannedReport;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ProcessingResult {
    pub source_file: String,
    pub source_kind: SourceKind,
    pub findings: Vec<Finding>,
}

pub struct FileProcessor {
    extractor: ReconExtractor,
    normalizer: FindingNormalizer,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            extractor: ReconExtractor::new(),
            normalizer: FindingNormalizer::new(),
        }
    }

    pub fn process(&self, report: &ScannedReport) -> Result<ProcessingResult> {
        info!("Processing report: {}", report.relative_path);

        let content = self.read_file_content(&report.path)?;
        let kind = detect_source_kind(&report.relative_path, &content);
        let asset_hint = report.file_stem();

        let facts = self.extractor.extract(&content, kind, &asset_hint);
        let findings = self
            .normalizer
            .normalize_all(facts, &report.relative_path);

        debug!(
            "{}: {} findings from {} source",
            report.relative_path,
            findings.len(),
            kind.as_str()
        );

        Ok(ProcessingResult {
            source_file: report.relative_path.clone(),
            source_kind: kind,
            findings,
        })
    }

    /// Recon tooling occasionally emits stray non-UTF-8 bytes; a lossy
    /// decode keeps the rest of the report instead of discarding the file.
    fn read_file_content(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

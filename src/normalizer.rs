// file: src/normalizer.rs
// description: raw fact canonicalization into finding records
// reference: canonical field normalization for stable grouping

use crate::models::{Finding, RawFact};

/// Converts raw fact tuples into `Finding` records with a canonical field
/// set. Assets are trimmed and lower-cased so grouping keys agree across
/// files; `detail` keeps its original case for readability. Absent string
/// fields become the empty string so downstream stages never branch on
/// field presence.
pub struct FindingNormalizer;

impl FindingNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, fact: RawFact, source_file: &str) -> Finding {
        Finding {
            asset: fact.asset.trim().to_lowercase(),
            category: fact.category,
            detail: fact.detail.trim().to_string(),
            port: fact.port,
            protocol: fact.protocol.trim().to_lowercase(),
            source_file: source_file.to_string(),
        }
    }

    pub fn normalize_all(&self, facts: Vec<RawFact>, source_file: &str) -> Vec<Finding> {
        facts
            .into_iter()
            .map(|fact| self.normalize(fact, source_file))
            .collect()
    }
}

impl Default for FindingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

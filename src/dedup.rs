// file: src/dedup.rs
// description: first-wins finding deduplication across report files
// reference: set-reduction keyed on (asset, category, detail)

use crate::models::{Finding, FindingCategory};
use std::collections::HashSet;

/// Collapses repeated findings across files. The key is
/// `(asset, category, detail)`; the first occurrence wins, so with reports
/// processed in a stable caller-specified order the kept `source_file` is
/// deterministic. Pure reduction, no error conditions.
pub struct FindingDeduplicator;

impl FindingDeduplicator {
    pub fn new() -> Self {
        Self
    }

    pub fn dedup(&self, findings: Vec<Finding>) -> Vec<Finding> {
        let mut seen: HashSet<(String, FindingCategory, String)> = HashSet::new();
        let mut kept = Vec::with_capacity(findings.len());

        for finding in findings {
            if seen.insert(finding.dedup_key()) {
                kept.push(finding);
            }
        }

        kept
    }
}

impl Default for FindingDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subdomain(name: &str, source_file: &str) -> Finding {
        Finding {
            asset: name.to_string(),
            category: FindingCategory::Subdomain,
            detail: name.to_string(),
            port: None,
            protocol: String::new(),
            source_file: source_file.to_string(),
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let dedup = FindingDeduplicator::new();
        let findings = vec![
            subdomain("sub.example.com", "first.txt"),
            subdomain("sub.example.com", "second.txt"),
        ];

        let kept = dedup.dedup(findings);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_file, "first.txt");
    }

    #[test]
    fn test_distinct_details_both_survive() {
        let dedup = FindingDeduplicator::new();
        let mut a = subdomain("host.example.com", "a.txt");
        a.detail = "A 203.0.113.1".to_string();
        let mut b = subdomain("host.example.com", "a.txt");
        b.detail = "A 203.0.113.2".to_string();

        assert_eq!(dedup.dedup(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let dedup = FindingDeduplicator::new();
        let findings = vec![
            subdomain("c.example.com", "x.txt"),
            subdomain("a.example.com", "x.txt"),
            subdomain("b.example.com", "x.txt"),
            subdomain("a.example.com", "y.txt"),
        ];

        let kept = dedup.dedup(findings);
        let assets: Vec<&str> = kept.iter().map(|f| f.asset.as_str()).collect();
        assert_eq!(assets, vec!["c.example.com", "a.example.com", "b.example.com"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(FindingDeduplicator::new().dedup(vec![]).is_empty());
    }
}

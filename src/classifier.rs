// file: src/classifier.rs
// description: rule-table severity classification for normalized findings
// reference: ordered first-match-wins rule evaluation

use crate::config::ClassificationConfig;
use crate::models::{ClassifiedFinding, Finding, FindingCategory, Severity};
use tracing::debug;

/// Assigns exactly one severity bucket to every finding. Rules are
/// evaluated top to bottom: port table, then banner keyword rules, then
/// category rules; the first match wins and anything unmatched is `Info`.
/// Classification never fails.
pub struct SeverityClassifier {
    config: ClassificationConfig,
}

impl SeverityClassifier {
    pub fn new(config: ClassificationConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, finding: &Finding) -> Severity {
        if finding.category == FindingCategory::Port {
            if let Some(severity) = self.match_port(finding) {
                return severity;
            }
            if let Some(severity) = self.match_banner(finding) {
                return severity;
            }
        }

        if let Some(severity) = self.match_category(finding) {
            return severity;
        }

        debug!(
            "No severity rule matched {}/{}, defaulting to Info",
            finding.asset, finding.category
        );
        Severity::Info
    }

    pub fn classify_all(&self, findings: Vec<Finding>) -> Vec<ClassifiedFinding> {
        findings
            .into_iter()
            .map(|finding| {
                let severity = self.classify(&finding);
                ClassifiedFinding::new(finding, severity)
            })
            .collect()
    }

    fn match_port(&self, finding: &Finding) -> Option<Severity> {
        let port = finding.port?;
        self.config
            .port_rules
            .iter()
            .find(|rule| rule.port == port)
            .map(|rule| rule.severity)
    }

    fn match_banner(&self, finding: &Finding) -> Option<Severity> {
        let detail = finding.detail.to_lowercase();
        self.config
            .banner_rules
            .iter()
            .find(|rule| detail.contains(&rule.keyword.to_lowercase()))
            .map(|rule| rule.severity)
    }

    fn match_category(&self, finding: &Finding) -> Option<Severity> {
        let detail = finding.detail.to_lowercase();
        self.config
            .category_rules
            .iter()
            .find(|rule| {
                rule.category == finding.category
                    && rule
                        .contains
                        .as_ref()
                        .map(|needle| detail.contains(&needle.to_lowercase()))
                        .unwrap_or(true)
            })
            .map(|rule| rule.severity)
    }
}

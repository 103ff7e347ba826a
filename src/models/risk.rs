// file: src/models/risk.rs
// description: risk register rows and compliance summary rows
// reference: ISO 27001 Annex A control coverage reporting

use crate::models::{ClassifiedFinding, Severity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingStatus {
    Open,
    InProgress,
    Remediated,
}

impl FindingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Open => "Open",
            FindingStatus::InProgress => "In Progress",
            FindingStatus::Remediated => "Remediated",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, FindingStatus::Remediated)
    }
}

impl Default for FindingStatus {
    fn default() -> Self {
        FindingStatus::Open
    }
}

/// One row of the risk register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    #[serde(flatten)]
    pub classified: ClassifiedFinding,
    pub control_ids: BTreeSet<String>,
    pub due_date: NaiveDate,
    pub status: FindingStatus,
}

impl RiskEntry {
    /// Register rendering of the mapped controls; the empty set is a valid
    /// mapping result and surfaces as "Unmapped", never as an error.
    pub fn controls_label(&self) -> String {
        if self.control_ids.is_empty() {
            "Unmapped".to_string()
        } else {
            self.control_ids.iter().cloned().collect::<Vec<_>>().join("; ")
        }
    }

    pub fn severity(&self) -> Severity {
        self.classified.severity
    }

    pub fn is_unresolved_actionable(&self) -> bool {
        self.severity().is_actionable() && !self.status.is_resolved()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageStatus {
    Covered,
    PartiallyCovered,
    Gap,
}

impl CoverageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Covered => "Covered",
            CoverageStatus::PartiallyCovered => "Partially Covered",
            CoverageStatus::Gap => "Gap",
        }
    }
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the compliance summary; the summary carries exactly one row
/// per scaffold control, including controls with zero mapped findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRow {
    pub control_id: String,
    pub mapped_count: usize,
    pub highest_severity: Option<Severity>,
    pub coverage_status: CoverageStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Finding, FindingCategory};

    fn entry(severity: Severity, controls: &[&str]) -> RiskEntry {
        let finding = Finding {
            asset: "198.51.100.7".to_string(),
            category: FindingCategory::Port,
            detail: "ftp vsftpd 2.3.4".to_string(),
            port: Some(21),
            protocol: "tcp".to_string(),
            source_file: "scan.txt".to_string(),
        };
        RiskEntry {
            classified: ClassifiedFinding::new(finding, severity),
            control_ids: controls.iter().map(|s| s.to_string()).collect(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            status: FindingStatus::default(),
        }
    }

    #[test]
    fn test_empty_mapping_renders_unmapped() {
        assert_eq!(entry(Severity::Low, &[]).controls_label(), "Unmapped");
    }

    #[test]
    fn test_controls_label_sorted_join() {
        let label = entry(Severity::High, &["A.13.1", "A.9.1"]).controls_label();
        assert_eq!(label, "A.13.1; A.9.1");
    }

    #[test]
    fn test_open_critical_is_unresolved() {
        assert!(entry(Severity::Critical, &[]).is_unresolved_actionable());
        assert!(!entry(Severity::Medium, &[]).is_unresolved_actionable());

        let mut remediated = entry(Severity::Critical, &[]);
        remediated.status = FindingStatus::Remediated;
        assert!(!remediated.is_unresolved_actionable());
    }
}

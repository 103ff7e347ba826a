// file: src/exporter/csv.rs
// description: csv export of the findings, risk register, and compliance tables
// reference: https://docs.rs/csv

use crate::error::Result;
use crate::models::{ComplianceRow, Finding, RiskEntry};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes the three pipeline tables as CSV for the downstream report
/// renderer. Column order is fixed by the record structs below; the
/// renderer consumes these files read-only and applies no further risk
/// logic.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct FindingRecord<'a> {
    asset: &'a str,
    category: &'a str,
    detail: &'a str,
    port: Option<u16>,
    protocol: &'a str,
    source_file: &'a str,
}

#[derive(Debug, Serialize)]
struct RiskRecord<'a> {
    asset: &'a str,
    category: &'a str,
    detail: &'a str,
    severity: &'a str,
    control_ids: String,
    due_date: String,
    status: &'a str,
}

#[derive(Debug, Serialize)]
struct ComplianceRecord<'a> {
    control_id: &'a str,
    mapped_count: usize,
    highest_severity: String,
    coverage_status: &'a str,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export_findings(&self, findings: &[Finding]) -> Result<PathBuf> {
        let path = self.output_dir.join("findings.csv");
        let mut writer = csv::Writer::from_path(&path)?;

        for finding in findings {
            writer.serialize(FindingRecord {
                asset: &finding.asset,
                category: finding.category.as_str(),
                detail: &finding.detail,
                port: finding.port,
                protocol: &finding.protocol,
                source_file: &finding.source_file,
            })?;
        }
        writer.flush()?;

        info!("Wrote {} findings to {}", findings.len(), path.display());
        Ok(path)
    }

    pub fn export_risk_register(&self, entries: &[RiskEntry]) -> Result<PathBuf> {
        let path = self.output_dir.join("risk_register.csv");
        let mut writer = csv::Writer::from_path(&path)?;

        for entry in entries {
            writer.serialize(RiskRecord {
                asset: &entry.classified.finding.asset,
                category: entry.classified.finding.category.as_str(),
                detail: &entry.classified.finding.detail,
                severity: entry.severity().as_str(),
                control_ids: entry.controls_label(),
                due_date: entry.due_date.to_string(),
                status: entry.status.as_str(),
            })?;
        }
        writer.flush()?;

        info!(
            "Wrote {} risk entries to {}",
            entries.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn export_compliance_summary(&self, rows: &[ComplianceRow]) -> Result<PathBuf> {
        let path = self.output_dir.join("compliance_summary.csv");
        let mut writer = csv::Writer::from_path(&path)?;

        for row in rows {
            writer.serialize(ComplianceRecord {
                control_id: &row.control_id,
                mapped_count: row.mapped_count,
                highest_severity: row
                    .highest_severity
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
                coverage_status: row.coverage_status.as_str(),
            })?;
        }
        writer.flush()?;

        info!(
            "Wrote {} compliance rows to {}",
            rows.len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassifiedFinding, CoverageStatus, FindingCategory, FindingStatus, Severity,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn finding() -> Finding {
        Finding {
            asset: "app.example.com".to_string(),
            category: FindingCategory::Port,
            detail: "ssh OpenSSH 7.2".to_string(),
            port: Some(22),
            protocol: "tcp".to_string(),
            source_file: "nmap.txt".to_string(),
        }
    }

    #[test]
    fn test_findings_csv_round() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();

        let path = exporter.export_findings(&[finding()]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.starts_with("asset,category,detail,port,protocol,source_file"));
        assert!(content.contains("app.example.com,port,ssh OpenSSH 7.2,22,tcp,nmap.txt"));
    }

    #[test]
    fn test_risk_register_csv_renders_unmapped() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();

        let entry = RiskEntry {
            classified: ClassifiedFinding::new(finding(), Severity::High),
            control_ids: BTreeSet::new(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            status: FindingStatus::Open,
        };

        let path = exporter.export_risk_register(&[entry]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.contains("High"));
        assert!(content.contains("Unmapped"));
        assert!(content.contains("2026-03-15"));
        assert!(content.contains("Open"));
    }

    #[test]
    fn test_compliance_csv_empty_severity_for_gaps() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();

        let rows = vec![ComplianceRow {
            control_id: "A.9.1".to_string(),
            mapped_count: 0,
            highest_severity: None,
            coverage_status: CoverageStatus::Gap,
        }];

        let path = exporter.export_compliance_summary(&rows).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.contains("A.9.1,0,,Gap"));
    }
}

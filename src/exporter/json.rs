// file: src/exporter/json.rs
// description: json export of the pipeline tables with a manifest
// reference: programmatic consumers of the risk tables

use crate::error::Result;
use crate::models::{ComplianceRow, Finding, RiskEntry};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_findings: usize,
    pub total_risk_entries: usize,
    pub total_controls: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir, pretty })
    }

    pub fn export_all(
        &self,
        findings: &[Finding],
        risk_register: &[RiskEntry],
        compliance_summary: &[ComplianceRow],
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {}", self.output_dir.display());

        let files = vec![
            self.write_table("findings.json", findings)?,
            self.write_table("risk_register.json", risk_register)?,
            self.write_table("compliance_summary.json", compliance_summary)?,
        ];

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_findings: findings.len(),
            total_risk_entries: risk_register.len(),
            total_controls: compliance_summary.len(),
            files,
        };

        let manifest_path = self.output_dir.join("manifest.json");
        fs::write(&manifest_path, self.to_json(&manifest)?)?;

        info!(
            "Export complete: {} findings, {} risk entries, {} controls",
            manifest.total_findings, manifest.total_risk_entries, manifest.total_controls
        );
        Ok(manifest)
    }

    fn write_table<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<String> {
        let path = self.output_dir.join(name);
        fs::write(&path, self.to_json(&rows)?)?;
        Ok(name.to_string())
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FindingCategory;
    use tempfile::tempdir;

    #[test]
    fn test_export_all_writes_tables_and_manifest() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path(), false).unwrap();

        let findings = vec![Finding {
            asset: "sub.example.com".to_string(),
            category: FindingCategory::Subdomain,
            detail: "sub.example.com".to_string(),
            port: None,
            protocol: String::new(),
            source_file: "subs.txt".to_string(),
        }];

        let manifest = exporter.export_all(&findings, &[], &[]).unwrap();

        assert_eq!(manifest.total_findings, 1);
        assert_eq!(manifest.files.len(), 3);
        assert!(dir.path().join("findings.json").exists());
        assert!(dir.path().join("manifest.json").exists());

        let raw = std::fs::read_to_string(dir.path().join("findings.json")).unwrap();
        assert!(raw.contains("\"subdomain\""));
    }

    #[test]
    fn test_pretty_output() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path(), true).unwrap();

        exporter.export_all(&[], &[], &[]).unwrap();
        let raw = std::fs::read_to_string(dir.path().join("manifest.json")).unwrap();
        assert!(raw.contains('\n'));
    }
}

// file: src/pipeline/orchestrator.rs
// description: coordinates report discovery, extraction, and risk derivation
// reference: orchestrates the normalization and risk pipeline end to end

use crate::classifier::SeverityClassifier;
use crate::compliance::{ControlScaffold, RiskAggregator};
use crate::config::Config;
use crate::dedup::FindingDeduplicator;
use crate::error::Result;
use crate::models::{ComplianceRow, Finding, RiskEntry};
use crate::pipeline::processor::{FileProcessor, ProcessingResult};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::reports::{ReportScanner, ScannedReport};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// The three output tables plus run statistics; the whole contract with
/// downstream report rendering.
pub struct PipelineOutput {
    pub findings: Vec<Finding>,
    pub risk_register: Vec<RiskEntry>,
    pub compliance_summary: Vec<ComplianceRow>,
    pub stats: PipelineStats,
}

pub struct PipelineOrchestrator {
    config: Config,
    scaffold: ControlScaffold,
    processor: Arc<FileProcessor>,
    max_concurrent_tasks: usize,
}

impl PipelineOrchestrator {
    /// Fails fast if the scaffold cannot be loaded; findings without a
    /// control mapping would make every coverage row silently wrong.
    pub fn new(config: Config) -> Result<Self> {
        let scaffold = ControlScaffold::load(&config.scaffold.path)?;
        let processor = Arc::new(FileProcessor::new());
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Ok(Self {
            config,
            scaffold,
            processor,
            max_concurrent_tasks,
        })
    }

    pub fn with_scaffold(config: Config, scaffold: ControlScaffold) -> Self {
        let processor = Arc::new(FileProcessor::new());
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Self {
            config,
            scaffold,
            processor,
            max_concurrent_tasks,
        }
    }

    pub async fn run(&self, run_date: NaiveDate) -> Result<PipelineOutput> {
        info!("Starting recon risk pipeline, run date {}", run_date);

        let reports = self.scan_reports().await?;
        info!("Found {} report files to process", reports.len());

        let progress = Arc::new(ProgressTracker::new(reports.len()));
        let findings = self.extract_findings(reports, progress.clone()).await;

        let deduped = FindingDeduplicator::new().dedup(findings);
        info!("{} findings after deduplication", deduped.len());

        let classifier = SeverityClassifier::new(self.config.classification.clone());
        let classified = classifier.classify_all(deduped.clone());

        let aggregator = RiskAggregator::new(&self.scaffold, self.config.sla);
        let risk_register = aggregator.risk_register(classified, run_date);
        let compliance_summary = aggregator.compliance_summary(&risk_register);

        let stats = progress.get_stats();
        progress.finish();
        self.log_final_stats(&stats);

        Ok(PipelineOutput {
            findings: deduped,
            risk_register,
            compliance_summary,
            stats,
        })
    }

    async fn scan_reports(&self) -> Result<Vec<ScannedReport>> {
        let input_dir = self.config.reports.input_dir.clone();
        let reports_config = self.config.reports.clone();

        tokio::task::spawn_blocking(move || {
            let scanner = ReportScanner::new(reports_config);
            scanner.scan_directory(&input_dir)
        })
        .await
        .map_err(|e| crate::error::PipelineError::Validation(format!("Scan task failed: {}", e)))?
    }

    /// Per-file extraction with bounded concurrency. `buffered` yields
    /// results in input order, so the flattened finding sequence follows
    /// the scanner's stable file order and dedup stays deterministic. A
    /// file that cannot be read contributes nothing; the run continues.
    async fn extract_findings(
        &self,
        reports: Vec<ScannedReport>,
        progress: Arc<ProgressTracker>,
    ) -> Vec<Finding> {
        let results: Vec<Option<ProcessingResult>> = stream::iter(reports)
            .map(|report| {
                let processor = self.processor.clone();
                let progress = progress.clone();

                async move {
                    let size = report.size;
                    let relative_path = report.relative_path.clone();

                    let processed = tokio::task::spawn_blocking(move || processor.process(&report))
                        .await;

                    match processed {
                        Ok(Ok(result)) => {
                            progress.inc_files_processed();
                            progress.add_bytes_processed(size);
                            progress.add_findings(result.findings.len());
                            Some(result)
                        }
                        Ok(Err(e)) => {
                            progress.inc_files_failed();
                            warn!("Skipping unreadable report {}: {}", relative_path, e);
                            None
                        }
                        Err(e) => {
                            progress.inc_files_failed();
                            warn!("Processing task panicked for {}: {}", relative_path, e);
                            None
                        }
                    }
                }
            })
            .buffered(self.max_concurrent_tasks)
            .collect()
            .await;

        results
            .into_iter()
            .flatten()
            .flat_map(|result| result.findings)
            .collect()
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!(
            "Pipeline complete: {} files processed, {} failed, {} findings extracted in {}s",
            stats.files_processed,
            stats.files_failed,
            stats.findings_extracted,
            stats.duration_secs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::ScaffoldControl;
    use crate::models::{CoverageStatus, FindingCategory, Severity};
    use std::fs;
    use tempfile::tempdir;

    fn test_scaffold() -> ControlScaffold {
        ControlScaffold::from_controls(vec![
            ScaffoldControl {
                control_id: "A.9.1".to_string(),
                title: "Access control".to_string(),
                keywords: vec!["ssh".to_string(), "telnet".to_string()],
                categories: vec![FindingCategory::Port],
            },
            ScaffoldControl {
                control_id: "A.13.1".to_string(),
                title: "Network security management".to_string(),
                keywords: vec![],
                categories: vec![FindingCategory::Dns, FindingCategory::Subdomain],
            },
        ])
    }

    fn orchestrator_for(dir: &std::path::Path) -> PipelineOrchestrator {
        let mut config = Config::default_config();
        config.reports.input_dir = dir.to_path_buf();
        PipelineOrchestrator::with_scaffold(config, test_scaffold())
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_run() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("nmap_app.txt"),
            "Target: app.example.com\n22/tcp open ssh OpenSSH 7.2\n###garbage###\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("subdomains_a.txt"),
            "sub.example.com\nshop.example.com\n",
        )
        .unwrap();

        let output = orchestrator_for(dir.path()).run(run_date()).await.unwrap();

        assert_eq!(output.findings.len(), 3);
        assert_eq!(output.risk_register.len(), 3);
        // One row per scaffold control, always.
        assert_eq!(output.compliance_summary.len(), 2);

        // The vulnerable ssh banner classifies High and maps to A.9.1.
        let top = &output.risk_register[0];
        assert_eq!(top.severity(), Severity::High);
        assert!(top.control_ids.contains("A.9.1"));
        assert_eq!(top.due_date, run_date() + chrono::Days::new(14));
    }

    #[tokio::test]
    async fn test_dedup_across_files_first_file_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("subs_a.txt"), "sub.example.com\n").unwrap();
        fs::write(dir.path().join("subs_b.txt"), "sub.example.com\n").unwrap();

        let output = orchestrator_for(dir.path()).run(run_date()).await.unwrap();

        assert_eq!(output.findings.len(), 1);
        assert_eq!(output.findings[0].source_file, "subs_a.txt");
    }

    #[tokio::test]
    async fn test_empty_input_still_reports_gaps() {
        let dir = tempdir().unwrap();

        let output = orchestrator_for(dir.path()).run(run_date()).await.unwrap();

        assert!(output.findings.is_empty());
        assert_eq!(output.compliance_summary.len(), 2);
        assert!(output
            .compliance_summary
            .iter()
            .all(|row| row.coverage_status == CoverageStatus::Gap));
    }

    #[tokio::test]
    async fn test_idempotent_runs() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("nmap.txt"),
            "Target: app.example.com\n21/tcp open ftp vsftpd 2.3.4\n23/tcp open telnet\n",
        )
        .unwrap();
        fs::write(dir.path().join("subs.txt"), "a.example.com\nb.example.com\n").unwrap();

        let orchestrator = orchestrator_for(dir.path());
        let first = orchestrator.run(run_date()).await.unwrap();
        let second = orchestrator.run(run_date()).await.unwrap();

        let render = |output: &PipelineOutput| {
            output
                .risk_register
                .iter()
                .map(|e| {
                    format!(
                        "{}|{}|{}|{}|{}|{}",
                        e.classified.finding.asset,
                        e.classified.finding.category,
                        e.classified.finding.detail,
                        e.severity(),
                        e.controls_label(),
                        e.due_date
                    )
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(render(&first), render(&second));
        assert_eq!(first.findings.len(), second.findings.len());
    }

    #[tokio::test]
    async fn test_missing_scaffold_is_fatal() {
        let mut config = Config::default_config();
        config.scaffold.path = "/nonexistent/scaffold.csv".into();

        assert!(PipelineOrchestrator::new(config).is_err());
    }
}

// file: src/compliance/aggregator.rs
// description: risk register construction and control coverage summary
// reference: SLA-driven remediation scheduling over the full scaffold

use crate::compliance::mapper::ControlMapper;
use crate::compliance::scaffold::ControlScaffold;
use crate::config::SlaConfig;
use crate::models::{
    ClassifiedFinding, ComplianceRow, CoverageStatus, FindingStatus, RiskEntry, Severity,
};
use chrono::{Days, NaiveDate};
use tracing::info;

/// Builds the two derived tables. The scaffold and SLA tables come in
/// explicitly so a run is a pure function of (findings, configuration,
/// run_date).
pub struct RiskAggregator<'a> {
    scaffold: &'a ControlScaffold,
    sla: SlaConfig,
}

impl<'a> RiskAggregator<'a> {
    pub fn new(scaffold: &'a ControlScaffold, sla: SlaConfig) -> Self {
        Self { scaffold, sla }
    }

    /// Risk register rows, sorted severity-descending with
    /// asset/category/detail as the stable tie-break. Due dates are
    /// `run_date + sla_days[severity]`, reproducible from severity alone.
    pub fn risk_register(
        &self,
        classified: Vec<ClassifiedFinding>,
        run_date: NaiveDate,
    ) -> Vec<RiskEntry> {
        let mapper = ControlMapper::new(self.scaffold);

        let mut entries: Vec<RiskEntry> = classified
            .into_iter()
            .map(|classified| {
                let control_ids = mapper.map(&classified);
                let due_date = self.due_date(run_date, classified.severity);
                RiskEntry {
                    classified,
                    control_ids,
                    due_date,
                    status: FindingStatus::default(),
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.severity()
                .rank()
                .cmp(&a.severity().rank())
                .then_with(|| a.classified.finding.asset.cmp(&b.classified.finding.asset))
                .then_with(|| a.classified.finding.category.cmp(&b.classified.finding.category))
                .then_with(|| a.classified.finding.detail.cmp(&b.classified.finding.detail))
        });

        info!("Risk register built: {} entries", entries.len());
        entries
    }

    /// Compliance summary with exactly one row per scaffold control, in
    /// scaffold order. Controls nothing mapped to are gaps; mapped
    /// controls with unresolved Critical/High findings are only partially
    /// covered.
    pub fn compliance_summary(&self, entries: &[RiskEntry]) -> Vec<ComplianceRow> {
        let rows: Vec<ComplianceRow> = self
            .scaffold
            .controls()
            .iter()
            .map(|control| {
                let mapped: Vec<&RiskEntry> = entries
                    .iter()
                    .filter(|entry| entry.control_ids.contains(&control.control_id))
                    .collect();

                let highest_severity = mapped
                    .iter()
                    .map(|entry| entry.severity())
                    .max_by_key(Severity::rank);

                let coverage_status = if mapped.is_empty() {
                    CoverageStatus::Gap
                } else if mapped.iter().any(|entry| entry.is_unresolved_actionable()) {
                    CoverageStatus::PartiallyCovered
                } else {
                    CoverageStatus::Covered
                };

                ComplianceRow {
                    control_id: control.control_id.clone(),
                    mapped_count: mapped.len(),
                    highest_severity,
                    coverage_status,
                }
            })
            .collect();

        let gaps = rows
            .iter()
            .filter(|row| row.coverage_status == CoverageStatus::Gap)
            .count();
        info!(
            "Compliance summary built: {} controls, {} gaps",
            rows.len(),
            gaps
        );
        rows
    }

    fn due_date(&self, run_date: NaiveDate, severity: Severity) -> NaiveDate {
        run_date
            .checked_add_days(Days::new(self.sla.days_for(severity)))
            .unwrap_or(NaiveDate::MAX)
    }
}

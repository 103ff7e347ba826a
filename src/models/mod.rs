// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod finding;
pub mod risk;

pub use finding::{ClassifiedFinding, Finding, FindingCategory, RawFact, Severity, SourceKind};
pub use risk::{ComplianceRow, CoverageStatus, FindingStatus, RiskEntry};

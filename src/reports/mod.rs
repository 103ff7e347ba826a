// file: src/reports/mod.rs
// description: report file discovery module exports
// reference: internal module structure

pub mod scanner;

pub use scanner::{ReportScanner, ScannedReport};

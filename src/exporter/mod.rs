// file: src/exporter/mod.rs
// description: output table export module exports
// reference: internal module structure

pub mod csv;
pub mod json;

pub use csv::CsvExporter;
pub use json::{ExportManifest, JsonExporter};

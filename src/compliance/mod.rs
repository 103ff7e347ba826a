// file: src/compliance/mod.rs
// description: control scaffold, mapping, and risk aggregation exports
// reference: internal module structure

pub mod aggregator;
pub mod mapper;
pub mod scaffold;

pub use aggregator::RiskAggregator;
pub use mapper::ControlMapper;
pub use scaffold::{ControlScaffold, ScaffoldControl};

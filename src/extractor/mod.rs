// file: src/extractor/mod.rs
// description: recon fact extraction module exports
// reference: internal module structure

pub mod patterns;
pub mod recon;
pub mod source;

pub use recon::ReconExtractor;
pub use source::detect_source_kind;

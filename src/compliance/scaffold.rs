// file: src/compliance/scaffold.rs
// description: ISO 27001 control scaffold loading from csv configuration
// reference: https://docs.rs/csv

use crate::error::{PipelineError, Result};
use crate::models::FindingCategory;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One Annex A control with the keywords and finding categories it covers.
#[derive(Debug, Clone)]
pub struct ScaffoldControl {
    pub control_id: String,
    pub title: String,
    pub keywords: Vec<String>,
    pub categories: Vec<FindingCategory>,
}

/// Read-only control mapping table, loaded once per run. A missing or
/// unparseable scaffold is fatal: producing a compliance summary against
/// the wrong control set would be silently wrong.
#[derive(Debug, Clone)]
pub struct ControlScaffold {
    controls: Vec<ScaffoldControl>,
}

#[derive(Debug, Deserialize)]
struct ScaffoldRecord {
    control_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    categories: String,
}

impl ControlScaffold {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::Scaffold(format!(
                "Scaffold file not found: {}",
                path.display()
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PipelineError::Scaffold(format!("{}: {}", path.display(), e)))?;

        let mut controls = Vec::new();
        for record in reader.deserialize::<ScaffoldRecord>() {
            let record =
                record.map_err(|e| PipelineError::Scaffold(format!("{}: {}", path.display(), e)))?;

            if record.control_id.is_empty() {
                return Err(PipelineError::Scaffold(format!(
                    "{}: row with empty control_id",
                    path.display()
                )));
            }

            controls.push(ScaffoldControl {
                control_id: record.control_id,
                title: record.title,
                keywords: split_list(&record.keywords),
                categories: split_list(&record.categories)
                    .iter()
                    .filter_map(|s| parse_category(s))
                    .collect(),
            });
        }

        if controls.is_empty() {
            return Err(PipelineError::Scaffold(format!(
                "{}: scaffold contains no controls",
                path.display()
            )));
        }

        info!(
            "Loaded {} scaffold controls from {}",
            controls.len(),
            path.display()
        );
        Ok(Self { controls })
    }

    pub fn from_controls(controls: Vec<ScaffoldControl>) -> Self {
        Self { controls }
    }

    /// Controls in scaffold file order; the compliance summary iterates
    /// this in full so zero-match controls stay visible.
    pub fn controls(&self) -> &[ScaffoldControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_category(raw: &str) -> Option<FindingCategory> {
    match raw {
        "port" => Some(FindingCategory::Port),
        "dns" => Some(FindingCategory::Dns),
        "subdomain" => Some(FindingCategory::Subdomain),
        "whois" => Some(FindingCategory::Whois),
        "other" => Some(FindingCategory::Other),
        _ => None,
    }
}

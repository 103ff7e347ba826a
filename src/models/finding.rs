// file: src/models/finding.rs
// description: normalized recon finding model and severity buckets
// reference: recon scanner output conventions

use serde::{Deserialize, Serialize};

/// Declared shape of a raw report file, used to pick extraction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Whois,
    Dns,
    Subdomains,
    Ports,
    Generic,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Whois => "whois",
            SourceKind::Dns => "dns",
            SourceKind::Subdomains => "subdomains",
            SourceKind::Ports => "ports",
            SourceKind::Generic => "generic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    Port,
    Dns,
    Subdomain,
    Whois,
    Other,
}

impl FindingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCategory::Port => "port",
            FindingCategory::Dns => "dns",
            FindingCategory::Subdomain => "subdomain",
            FindingCategory::Whois => "whois",
            FindingCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transient extractor output, one fact per matched line.
#[derive(Debug, Clone)]
pub struct RawFact {
    pub category: FindingCategory,
    pub asset: String,
    pub detail: String,
    pub port: Option<u16>,
    pub protocol: String,
}

impl RawFact {
    pub fn new(category: FindingCategory, asset: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            category,
            asset: asset.into(),
            detail: detail.into(),
            port: None,
            protocol: String::new(),
        }
    }

    pub fn with_port(mut self, port: u16, protocol: impl Into<String>) -> Self {
        self.port = Some(port);
        self.protocol = protocol.into();
        self
    }
}

/// A single normalized fact extracted from recon data.
///
/// Immutable once created by the normalizer. After deduplication no two
/// findings share `(asset, category, detail)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub asset: String,
    pub category: FindingCategory,
    pub detail: String,
    pub port: Option<u16>,
    pub protocol: String,
    pub source_file: String,
}

impl Finding {
    /// Deduplication key; `source_file` deliberately excluded so the same
    /// fact seen in two reports collapses to one finding.
    pub fn dedup_key(&self) -> (String, FindingCategory, String) {
        (self.asset.clone(), self.category, self.detail.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }

    /// Numeric rank for ordering; higher is worse.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Info => 0,
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Finding plus its severity bucket. Classification is deterministic given
/// the same finding and rule tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedFinding {
    #[serde(flatten)]
    pub finding: Finding,
    pub severity: Severity,
}

impl ClassifiedFinding {
    pub fn new(finding: Finding, severity: Severity) -> Self {
        Self { finding, severity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_rank_ordering() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
        assert!(Severity::Low.rank() > Severity::Info.rank());
    }

    #[test]
    fn test_dedup_key_ignores_source_file() {
        let a = Finding {
            asset: "host.example.com".to_string(),
            category: FindingCategory::Subdomain,
            detail: "host.example.com".to_string(),
            port: None,
            protocol: String::new(),
            source_file: "first.txt".to_string(),
        };
        let mut b = a.clone();
        b.source_file = "second.txt".to_string();

        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_raw_fact_with_port() {
        let fact = RawFact::new(FindingCategory::Port, "10.0.0.5", "ssh OpenSSH 8.9")
            .with_port(22, "tcp");

        assert_eq!(fact.port, Some(22));
        assert_eq!(fact.protocol, "tcp");
    }
}

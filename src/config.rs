// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::models::{FindingCategory, Severity};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub reports: ReportsConfig,
    pub pipeline: PipelineConfig,
    pub classification: ClassificationConfig,
    pub sla: SlaConfig,
    pub scaffold: ScaffoldConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportsConfig {
    pub input_dir: PathBuf,
    pub extensions: Vec<String>,
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    pub output_dir: PathBuf,
    pub pretty_json: bool,
}

/// Ordered severity rule tables. Evaluation order is port rules, then banner
/// rules, then category rules, first match wins; rule order in the file is
/// the tie-break.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub port_rules: Vec<PortRule>,
    #[serde(default)]
    pub banner_rules: Vec<BannerRule>,
    #[serde(default)]
    pub category_rules: Vec<CategoryRule>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortRule {
    pub port: u16,
    pub severity: Severity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BannerRule {
    pub keyword: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryRule {
    pub category: FindingCategory,
    #[serde(default)]
    pub contains: Option<String>,
    pub severity: Severity,
}

/// Remediation SLA in days per severity bucket.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SlaConfig {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub info: u64,
}

impl SlaConfig {
    pub fn days_for(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScaffoldConfig {
    pub path: PathBuf,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RISKLINE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            reports: ReportsConfig {
                input_dir: PathBuf::from("./reports"),
                extensions: vec!["txt".to_string(), "log".to_string()],
                skip_patterns: vec!["*.pdf".to_string(), ".git/*".to_string()],
                max_file_size_mb: 10,
            },
            pipeline: PipelineConfig {
                parallel_workers: 4,
                output_dir: PathBuf::from("./outputs"),
                pretty_json: false,
            },
            classification: ClassificationConfig {
                port_rules: vec![
                    PortRule { port: 23, severity: Severity::Critical },
                    PortRule { port: 3389, severity: Severity::Critical },
                    PortRule { port: 445, severity: Severity::Critical },
                    PortRule { port: 21, severity: Severity::High },
                    PortRule { port: 139, severity: Severity::High },
                    PortRule { port: 1433, severity: Severity::High },
                    PortRule { port: 3306, severity: Severity::High },
                    PortRule { port: 5432, severity: Severity::High },
                    PortRule { port: 27017, severity: Severity::High },
                ],
                banner_rules: vec![
                    BannerRule { keyword: "vsftpd 2.3.4".to_string(), severity: Severity::Critical },
                    BannerRule { keyword: "openssh 7.2".to_string(), severity: Severity::High },
                    BannerRule { keyword: "apache/2.2".to_string(), severity: Severity::High },
                    BannerRule { keyword: "iis/6.0".to_string(), severity: Severity::High },
                    BannerRule { keyword: "proftpd 1.3.3".to_string(), severity: Severity::High },
                ],
                category_rules: vec![
                    CategoryRule {
                        category: FindingCategory::Dns,
                        contains: Some("internal".to_string()),
                        severity: Severity::Medium,
                    },
                    CategoryRule {
                        category: FindingCategory::Whois,
                        contains: Some("redacted".to_string()),
                        severity: Severity::Info,
                    },
                    CategoryRule {
                        category: FindingCategory::Whois,
                        contains: Some("registrant".to_string()),
                        severity: Severity::Medium,
                    },
                    CategoryRule {
                        category: FindingCategory::Subdomain,
                        contains: None,
                        severity: Severity::Low,
                    },
                ],
            },
            sla: SlaConfig {
                critical: 7,
                high: 14,
                medium: 30,
                low: 90,
                info: 180,
            },
            scaffold: ScaffoldConfig {
                path: PathBuf::from("config/iso27001_scaffold.csv"),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "pipeline.parallel_workers must be at least 1".to_string(),
            ));
        }

        if self.reports.extensions.is_empty() {
            return Err(PipelineError::Config(
                "reports.extensions must not be empty".to_string(),
            ));
        }

        if self.reports.max_file_size_mb == 0 {
            return Err(PipelineError::Config(
                "reports.max_file_size_mb must be at least 1".to_string(),
            ));
        }

        for rule in &self.classification.banner_rules {
            if rule.keyword.trim().is_empty() {
                return Err(PipelineError::Config(
                    "classification.banner_rules keyword must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sla_lookup() {
        let sla = Config::default_config().sla;
        assert_eq!(sla.days_for(Severity::Critical), 7);
        assert_eq!(sla.days_for(Severity::High), 14);
        assert_eq!(sla.days_for(Severity::Medium), 30);
        assert_eq!(sla.days_for(Severity::Low), 90);
        assert_eq!(sla.days_for(Severity::Info), 180);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_banner_keyword_rejected() {
        let mut config = Config::default_config();
        config.classification.banner_rules.push(BannerRule {
            keyword: "  ".to_string(),
            severity: Severity::High,
        });
        assert!(config.validate().is_err());
    }
}

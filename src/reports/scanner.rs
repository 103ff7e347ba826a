// file: src/reports/scanner.rs
// description: Directory walking and report file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::ReportsConfig;
use crate::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct ReportScanner {
    config: ReportsConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedReport {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

impl ScannedReport {
    /// Asset hint for facts that carry no host of their own, mirroring how
    /// scan tooling names dump files after the target.
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string()
    }
}

impl ReportScanner {
    pub fn new(config: ReportsConfig) -> Self {
        Self { config }
    }

    /// Discovers report files under `root`. Results are sorted by relative
    /// path: the run order is stable, so downstream first-wins
    /// deduplication is deterministic.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedReport>> {
        info!("Scanning directory: {}", root.display());
        let mut reports = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if !self.has_report_extension(path) {
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };

            let size = metadata.len();
            let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;
            if size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            reports.push(ScannedReport {
                path: path.to_path_buf(),
                relative_path,
                size,
            });
        }

        reports.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!("Found {} report files", reports.len());
        Ok(reports)
    }

    fn has_report_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Three pattern shapes: `*.ext` (extension suffix), `dir/*` (any path
    /// component named `dir`), and a plain substring.
    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.skip_patterns {
            if let Some(ext) = pattern.strip_prefix("*.") {
                if path_str.ends_with(&format!(".{}", ext)) {
                    return true;
                }
            } else if let Some(dir) = pattern.strip_suffix("/*") {
                if path.components().any(|c| c.as_os_str() == OsStr::new(dir)) {
                    return true;
                }
            } else if path_str.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }
}

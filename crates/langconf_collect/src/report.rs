//! Collect report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one collect run.
#[derive(Debug, Default, Clone)]
pub struct ReportCollect {
    /// Total scanned file entries.
    pub cnt_scanned: u64,
    /// Number of files whose name matched.
    pub cnt_matched: u64,
    /// Number of matches copied into the resources tree.
    pub cnt_copied: u64,
    /// Number of destination directories that had to be created.
    pub cnt_dirs_created: u64,
    /// Number of directories not descended into.
    pub cnt_pruned: u64,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
}

impl ReportCollect {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_matched".to_string(), self.cnt_matched);
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_dirs_created".to_string(), self.cnt_dirs_created);
        dict_counts.insert("cnt_pruned".to_string(), self.cnt_pruned);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} matched={} copied={} dirs_created={} pruned={} warnings={}",
            self.cnt_scanned,
            self.cnt_matched,
            self.cnt_copied,
            self.cnt_dirs_created,
            self.cnt_pruned,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportCollect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COLLECT]"))
    }
}

/// Mutable accumulator for collect statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCollectBuilder {
    /// See [`ReportCollect::cnt_scanned`].
    pub cnt_scanned: u64,
    /// See [`ReportCollect::cnt_matched`].
    pub cnt_matched: u64,
    /// See [`ReportCollect::cnt_copied`].
    pub cnt_copied: u64,
    /// See [`ReportCollect::cnt_dirs_created`].
    pub cnt_dirs_created: u64,
    /// See [`ReportCollect::cnt_pruned`].
    pub cnt_pruned: u64,
    /// See [`ReportCollect::warnings`].
    pub warnings: Vec<String>,
}

impl ReportCollectBuilder {
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    pub fn add_matched(&mut self) {
        self.cnt_matched += 1;
    }

    pub fn add_copied(&mut self) {
        self.cnt_copied += 1;
    }

    pub fn add_dir_created(&mut self) {
        self.cnt_dirs_created += 1;
    }

    pub fn add_pruned(&mut self) {
        self.cnt_pruned += 1;
    }

    /// Record a warning and mirror it to the log.
    pub fn add_warning(&mut self, warning: String) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCollect {
        ReportCollect {
            cnt_scanned: self.cnt_scanned,
            cnt_matched: self.cnt_matched,
            cnt_copied: self.cnt_copied,
            cnt_dirs_created: self.cnt_dirs_created,
            cnt_pruned: self.cnt_pruned,
            warnings: self.warnings,
        }
    }
}

//! Reads the usage log and produces fresh statistics per request

use crate::stats::{recommendations, UsageStatistics};
use chrono::{DateTime, Utc};
use modelroute_core::{AnalysisConfig, Models, Settings, UsageRecord};
use modelroute_telemetry::{scan_jsonl, Paths};
use std::path::{Path, PathBuf};

/// Result of one analysis run
#[derive(Debug, Clone)]
pub struct UsageAnalysis {
    pub stats: UsageStatistics,
    pub recommendations: Vec<String>,
    /// False when the usage log does not exist yet
    pub history_found: bool,
    /// Lines that were not usage records (malformed, truncated, or decision records)
    pub skipped_lines: usize,
}

#[derive(Debug, Clone)]
pub struct UsageTracker {
    log_path: PathBuf,
    models: Models,
    analysis: AnalysisConfig,
}

impl UsageTracker {
    pub fn new(log_path: impl Into<PathBuf>, models: Models, analysis: AnalysisConfig) -> Self {
        Self {
            log_path: log_path.into(),
            models,
            analysis,
        }
    }

    pub fn from_settings(settings: &Settings, paths: &Paths) -> Self {
        Self::new(
            &paths.usage_log,
            settings.models.clone(),
            settings.analysis.clone(),
        )
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn analysis_config(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// Analyze the trailing `days` ending now
    pub fn analyze_usage(&self, days: u32) -> std::io::Result<UsageAnalysis> {
        self.analyze_at(days, Utc::now())
    }

    /// Analyze the trailing `days` ending at `now`
    ///
    /// A missing log is an empty history, not an error. Only I/O failures on
    /// an existing log are returned.
    pub fn analyze_at(&self, days: u32, now: DateTime<Utc>) -> std::io::Result<UsageAnalysis> {
        let history_found = self.log_path.exists();
        let scan = scan_jsonl::<UsageRecord>(&self.log_path)?;
        if scan.skipped > 0 {
            tracing::debug!(
                path = %self.log_path.display(),
                skipped = scan.skipped,
                "skipped non-usage lines"
            );
        }

        let stats = UsageStatistics::compute(&scan.records, days, now, &self.models, &self.analysis);
        let recommendations = recommendations(&stats, &self.analysis);

        Ok(UsageAnalysis {
            stats,
            recommendations,
            history_found,
            skipped_lines: scan.skipped,
        })
    }
}

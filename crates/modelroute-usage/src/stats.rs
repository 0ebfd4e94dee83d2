//! Windowed usage statistics and recommendations

use chrono::{DateTime, Duration, Utc};
use modelroute_core::{AnalysisConfig, ModelTier, Models, UsageRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate for one tier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierStats {
    pub count: u64,
    pub total_tokens: u64,
    /// successes / count, 0 when count is 0
    pub success_rate: f64,
}

/// Per-task split across tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub premium: u64,
    pub standard: u64,
}

/// Statistics over a trailing window, recomputed on every analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageStatistics {
    pub window_days: u32,
    pub records_considered: u64,
    pub premium: TierStats,
    pub standard: TierStats,
    pub task_distribution: BTreeMap<String, TierCounts>,
    /// PREMIUM runs of cheap task types that outnumber their STANDARD runs
    pub potential_savings: u64,
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    tokens: u64,
    successes: u64,
}

impl Accumulator {
    fn add(&mut self, record: &UsageRecord) {
        self.count += 1;
        self.tokens = self.tokens.saturating_add(record.tokens_used);
        if record.success {
            self.successes += 1;
        }
    }

    fn finish(self) -> TierStats {
        let success_rate = if self.count == 0 {
            0.0
        } else {
            self.successes as f64 / self.count as f64
        };
        TierStats {
            count: self.count,
            total_tokens: self.tokens,
            success_rate,
        }
    }
}

impl UsageStatistics {
    /// Fold the records inside `days` before `now`; older records are ignored
    pub fn compute<'a>(
        records: impl IntoIterator<Item = &'a UsageRecord>,
        days: u32,
        now: DateTime<Utc>,
        models: &Models,
        analysis: &AnalysisConfig,
    ) -> Self {
        // A window reaching past the representable range covers everything
        let cutoff = Duration::try_days(i64::from(days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut premium = Accumulator::default();
        let mut standard = Accumulator::default();
        let mut task_distribution: BTreeMap<String, TierCounts> = BTreeMap::new();
        let mut records_considered = 0;

        for record in records.into_iter().filter(|r| r.timestamp >= cutoff) {
            records_considered += 1;
            let counts = task_distribution.entry(record.task_type.clone()).or_default();
            match models.tier_of(&record.model) {
                ModelTier::Premium => {
                    premium.add(record);
                    counts.premium += 1;
                }
                ModelTier::Standard => {
                    standard.add(record);
                    counts.standard += 1;
                }
            }
        }

        let potential_savings = task_distribution
            .iter()
            .filter(|(task, counts)| counts.premium > counts.standard && analysis.is_cheap(task))
            .map(|(_, counts)| counts.premium)
            .sum();

        Self {
            window_days: days,
            records_considered,
            premium: premium.finish(),
            standard: standard.finish(),
            task_distribution,
            potential_savings,
        }
    }

    pub fn tier(&self, tier: ModelTier) -> &TierStats {
        match tier {
            ModelTier::Premium => &self.premium,
            ModelTier::Standard => &self.standard,
        }
    }
}

/// Advisory strings derived from the statistics
pub fn recommendations(stats: &UsageStatistics, analysis: &AnalysisConfig) -> Vec<String> {
    let mut recs = Vec::new();

    if stats.potential_savings > analysis.savings_threshold {
        recs.push(format!(
            "Consider moving {} simple tasks from PREMIUM to STANDARD",
            stats.potential_savings
        ));
    }

    let premium_rate = stats.premium.success_rate;
    let standard_rate = stats.standard.success_rate;
    if standard_rate > analysis.standard_success_threshold && standard_rate >= premium_rate {
        recs.push("STANDARD is performing very well - consider expanding its usage".to_string());
    }

    recs
}

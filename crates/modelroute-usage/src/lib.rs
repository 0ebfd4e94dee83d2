//! Usage analytics over the append-only usage log

mod report;
mod stats;
mod tracker;

pub use report::render_report;
pub use stats::{recommendations, TierCounts, TierStats, UsageStatistics};
pub use tracker::{UsageAnalysis, UsageTracker};

#![allow(dead_code)]

use chrono::{Duration, Utc};
use modelroute_core::{
    DecisionLog, ModelAwareAgent, ModelRouter, Settings, UsageLog, UsageRecord,
};
use modelroute_telemetry::{append_jsonl, Paths};
use modelroute_usage::UsageTracker;

pub const OPUS: &str = "claude-opus-4-20250514";
pub const SONNET: &str = "claude-3-5-sonnet-20241022";

pub fn sample_router(paths: &Paths) -> ModelRouter {
    ModelRouter::from_settings(&Settings::default(), paths)
}

pub fn sample_agent(paths: &Paths) -> ModelAwareAgent<UsageLog> {
    let settings = Settings::default();
    let router = ModelRouter::new(
        settings.router.clone(),
        settings.models.clone(),
        DecisionLog::new(&paths.decision_log),
    );
    ModelAwareAgent::new("integration", router, UsageLog::new(&paths.usage_log))
}

pub fn sample_tracker(paths: &Paths) -> UsageTracker {
    UsageTracker::from_settings(&Settings::default(), paths)
}

pub fn usage(model: &str, task_type: &str, success: bool, age_hours: i64) -> UsageRecord {
    UsageRecord {
        timestamp: Utc::now() - Duration::hours(age_hours),
        model: model.to_string(),
        task_type: task_type.to_string(),
        tokens_used: 250,
        success,
        duration_seconds: 1.5,
    }
}

pub fn write_usage(paths: &Paths, records: &[UsageRecord]) {
    for record in records {
        append_jsonl(&paths.usage_log, record).unwrap();
    }
}

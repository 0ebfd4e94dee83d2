use criterion::{criterion_group, criterion_main, Criterion};
use modelroute_core::{
    DecisionRecord, DecisionSink, Models, ModelRouter, RouterConfig, TaskContext,
};
use modelroute_usage::UsageStatistics;
use std::hint::black_box;

struct Discard;

impl DecisionSink for Discard {
    fn append(&self, _record: &DecisionRecord) {}
}

fn bench_decide_scored(c: &mut Criterion) {
    let router = ModelRouter::new(RouterConfig::default(), Models::default(), Discard);
    let context = TaskContext::new().with_retry_count(2).with_file_count(40);

    c.bench_function("decide_scored", |b| {
        b.iter(|| {
            router.decide(
                black_box("code_review"),
                black_box("review the pagination changes in the listing endpoints"),
                &context,
            )
        });
    });
}

fn bench_decide_trigger_word(c: &mut Criterion) {
    let router = ModelRouter::new(RouterConfig::default(), Models::default(), Discard);

    c.bench_function("decide_trigger_word", |b| {
        b.iter(|| {
            router.decide(
                black_box("file_operation"),
                black_box("move files then REVIEW ARCHITECTURE of the uploader"),
                &TaskContext::default(),
            )
        });
    });
}

fn bench_usage_statistics_10k(c: &mut Criterion) {
    let now = chrono::Utc::now();
    let records: Vec<_> = (0..10_000)
        .map(|i| modelroute_core::UsageRecord {
            timestamp: now - chrono::Duration::minutes(i),
            model: if i % 3 == 0 {
                "claude-opus-4-20250514".to_string()
            } else {
                "claude-3-5-sonnet-20241022".to_string()
            },
            task_type: format!("task_{}", i % 12),
            tokens_used: 500,
            success: i % 17 != 0,
            duration_seconds: 2.0,
        })
        .collect();
    let models = Models::default();
    let analysis = modelroute_core::AnalysisConfig::default();

    c.bench_function("usage_statistics_10k", |b| {
        b.iter(|| UsageStatistics::compute(black_box(&records), 7, now, &models, &analysis));
    });
}

criterion_group!(
    benches,
    bench_decide_scored,
    bench_decide_trigger_word,
    bench_usage_statistics_10k
);
criterion_main!(benches);

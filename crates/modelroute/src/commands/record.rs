use modelroute_core::{UsageLog, UsageRecord, UsageSink};
use modelroute_telemetry::Paths;
use std::sync::mpsc;

pub fn run(
    model: &str,
    task_type: &str,
    tokens: u64,
    success: bool,
    duration: f64,
) -> anyhow::Result<()> {
    let paths = Paths::from_env();
    println!(
        "{}",
        record(&paths, model, task_type, tokens, success, duration)?
    );
    Ok(())
}

fn record(
    paths: &Paths,
    model: &str,
    task_type: &str,
    tokens: u64,
    success: bool,
    duration: f64,
) -> anyhow::Result<String> {
    anyhow::ensure!(
        duration.is_finite() && duration >= 0.0,
        "duration must be a non-negative number of seconds"
    );

    let (tx, rx) = mpsc::channel();
    let log = UsageLog::new(&paths.usage_log).with_diagnostics(tx);
    log.append(&UsageRecord {
        timestamp: chrono::Utc::now(),
        model: model.to_string(),
        task_type: task_type.to_string(),
        tokens_used: tokens,
        success,
        duration_seconds: duration,
    });

    // Telemetry failures never fail the caller; the warning has already been logged
    Ok(match rx.try_recv() {
        Ok(failure) => format!("usage not recorded: {}", failure.message),
        Err(_) => format!("recorded {} on {}", task_type, model),
    })
}

use anyhow::Context;
use modelroute_core::Settings;
use modelroute_telemetry::Paths;
use modelroute_usage::{render_report, UsageTracker};

pub fn run(days: Option<u32>, json: bool) -> anyhow::Result<()> {
    let paths = Paths::from_env();
    let settings = Settings::load(&paths)?;
    println!("{}", build_output(&paths, &settings, days, json)?);
    Ok(())
}

fn build_output(
    paths: &Paths,
    settings: &Settings,
    days: Option<u32>,
    json: bool,
) -> anyhow::Result<String> {
    let tracker = UsageTracker::from_settings(settings, paths);
    let days = days.unwrap_or(settings.analysis.default_days);
    tracing::debug!(days, path = %tracker.log_path().display(), "analyzing usage");
    let analysis = tracker
        .analyze_usage(days)
        .with_context(|| format!("failed to read usage log {}", tracker.log_path().display()))?;

    if json {
        let output = serde_json::json!({
            "history_found": analysis.history_found,
            "skipped_lines": analysis.skipped_lines,
            "statistics": analysis.stats,
            "recommendations": analysis.recommendations,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        Ok(render_report(&analysis))
    }
}

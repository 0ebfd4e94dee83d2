use modelroute_core::{DecisionRecord, Settings, UsageRecord};
use modelroute_telemetry::{scan_jsonl, Paths};
use std::path::Path;

fn build_diagnostic(paths: &Paths, json_mode: bool) -> String {
    let file_checks = check_files(paths);

    if json_mode {
        let files: serde_json::Map<String, serde_json::Value> = file_checks
            .iter()
            .map(|(name, path, status)| {
                (
                    name.clone(),
                    serde_json::json!({ "path": path, "status": status }),
                )
            })
            .collect();
        let report = serde_json::json!({
            "system": {
                "os": std::env::consts::OS,
                "arch": std::env::consts::ARCH,
                "version": env!("CARGO_PKG_VERSION"),
            },
            "files": files,
            "shared_log": paths.shared_log(),
        });
        return serde_json::to_string_pretty(&report).unwrap_or_default();
    }

    let mut sections = Vec::new();
    sections.push("Diagnostic Report\n==================".to_string());
    sections.push(format!(
        "\nSystem\n------\n  OS: {}\n  Arch: {}\n  modelroute: {}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_VERSION"),
    ));

    sections.push("\nFiles\n-----".to_string());
    for (name, path, status) in &file_checks {
        sections.push(format!("  {} {} ({})", status, name, path));
    }
    if paths.shared_log() {
        sections.push("  decision and usage records share one log".to_string());
    }

    let issues = file_checks
        .iter()
        .filter(|(_, _, s)| s.starts_with("ERR"))
        .count();
    sections.push(format!("\n{} issues found", issues));

    sections.join("\n")
}

fn check_files(paths: &Paths) -> Vec<(String, String, String)> {
    let mut checks = Vec::new();

    let settings_status = match &paths.settings_file {
        Some(path) if path.exists() => match Settings::from_file(path) {
            Ok(_) => "OK ".to_string(),
            Err(e) => format!("ERR ({})", e),
        },
        Some(_) if paths.settings_explicit() => "ERR (missing)".to_string(),
        Some(_) => "MISS (defaults)".to_string(),
        None => "MISS (no home directory)".to_string(),
    };
    checks.push((
        "settings".to_string(),
        display(paths.settings_file.as_deref()),
        settings_status,
    ));

    checks.push((
        "decision log".to_string(),
        display(Some(paths.decision_log.as_path())),
        log_status::<DecisionRecord>(&paths.decision_log),
    ));
    checks.push((
        "usage log".to_string(),
        display(Some(paths.usage_log.as_path())),
        log_status::<UsageRecord>(&paths.usage_log),
    ));

    checks
}

fn log_status<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> String {
    if !path.exists() {
        return "MISS".to_string();
    }
    match scan_jsonl::<T>(path) {
        Ok(scan) => format!(
            "OK  ({} records, {} other lines)",
            scan.records.len(),
            scan.skipped
        ),
        Err(e) => format!("ERR (read error: {})", e),
    }
}

fn display(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let paths = Paths::from_env();
    println!("{}", build_diagnostic(&paths, json));
    Ok(())
}

use anyhow::Context;
use modelroute_core::{ModelRouter, Settings, TaskContext};
use modelroute_telemetry::Paths;

pub fn run(
    task_type: &str,
    description: &str,
    context: Option<&str>,
    threshold: Option<i32>,
    json: bool,
) -> anyhow::Result<()> {
    let paths = Paths::from_env();
    let mut settings = Settings::load(&paths)?;
    if let Some(threshold) = threshold {
        settings.router.threshold = threshold;
    }
    let output = select(&paths, &settings, task_type, description, context, json)?;
    println!("{}", output);
    Ok(())
}

fn select(
    paths: &Paths,
    settings: &Settings,
    task_type: &str,
    description: &str,
    context: Option<&str>,
    json: bool,
) -> anyhow::Result<String> {
    let context = match context {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--context is not valid JSON")?;
            TaskContext::from_json(&value)?
        }
        None => TaskContext::default(),
    };

    let router = ModelRouter::from_settings(settings, paths);
    let decision = router.select_decision(task_type, description, &context);
    let model = router.models().model_for(decision.tier);

    if json {
        let output = serde_json::json!({
            "tier": decision.tier,
            "model": model,
            "reason": decision.selection.reason(),
            "score": decision.selection.score(),
        });
        return Ok(serde_json::to_string(&output)?);
    }

    let detail = match decision.selection.score() {
        Some(score) => format!("{} {}", decision.selection.reason(), score),
        None => decision.selection.reason().to_string(),
    };
    Ok(format!("{} {} ({})", decision.tier, model, detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelroute_core::DecisionRecord;
    use modelroute_telemetry::read_jsonl;

    #[test]
    fn test_select_logs_decision() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());

        let output = select(
            &paths,
            &Settings::default(),
            "bug_fix",
            "fix pagination",
            Some(r#"{"retry_count": 2}"#),
            false,
        )
        .unwrap();
        assert_eq!(output, "PREMIUM claude-opus-4-20250514 (complexity_score 4)");

        let records: Vec<DecisionRecord> = read_jsonl(&paths.decision_log).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].task_type, "bug_fix");
    }

    #[test]
    fn test_select_json_trigger_word() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());
        let output = select(
            &paths,
            &Settings::default(),
            "code_format",
            "Refactor the module",
            None,
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["tier"], "PREMIUM");
        assert_eq!(value["reason"], "trigger_word");
        assert!(value["score"].is_null());
    }

    #[test]
    fn test_select_rejects_malformed_context() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::in_dir(temp.path());
        let err = select(
            &paths,
            &Settings::default(),
            "bug_fix",
            "fix",
            Some(r#"{"file_count": "lots"}"#),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("file_count"));
        assert!(!paths.decision_log.exists());
    }
}

use modelroute_core::{DecisionRecord, ModelTier, Selection};
use modelroute_telemetry::{read_jsonl, Paths};
use std::collections::BTreeMap;

pub fn run(stats: bool, limit: usize) -> anyhow::Result<()> {
    let paths = Paths::from_env();
    let decisions: Vec<DecisionRecord> = read_jsonl(&paths.decision_log)?;

    if decisions.is_empty() {
        println!("No routing decisions logged");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&decisions));
    } else {
        println!("{}", recent(&decisions, limit));
    }
    Ok(())
}

fn compute_stats(decisions: &[DecisionRecord]) -> String {
    if decisions.is_empty() {
        return "No decisions to analyze.".to_string();
    }

    let premium = decisions
        .iter()
        .filter(|d| d.tier == ModelTier::Premium)
        .count();
    let triggered = decisions
        .iter()
        .filter(|d| d.selection == Selection::TriggerWord)
        .count();
    let scores: Vec<i32> = decisions.iter().filter_map(|d| d.selection.score()).collect();
    let avg_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<i32>() as f64 / scores.len() as f64
    };

    let mut by_task: BTreeMap<&str, usize> = BTreeMap::new();
    for d in decisions {
        *by_task.entry(d.task_type.as_str()).or_default() += 1;
    }
    let tasks = by_task
        .iter()
        .map(|(task, n)| format!("  {}: {}", task, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Total decisions: {}\n\
         PREMIUM: {} | STANDARD: {}\n\
         Trigger-word overrides: {}\n\
         Avg complexity score: {:.2}\n\
         By task type:\n{}",
        decisions.len(),
        premium,
        decisions.len() - premium,
        triggered,
        avg_score,
        tasks
    )
}

fn recent(decisions: &[DecisionRecord], limit: usize) -> String {
    let shown: Vec<_> = decisions.iter().rev().take(limit).collect();
    let mut lines = vec![
        format!("Recent Decisions (last {})", shown.len()),
        "==========================".to_string(),
    ];
    for d in shown {
        let reason = match d.selection.score() {
            Some(score) => format!("score {}", score),
            None => "trigger word".to_string(),
        };
        lines.push(format!(
            "  {} | {:<8} | {:<12} | {} | {}",
            d.timestamp.format("%Y-%m-%d %H:%M"),
            d.tier,
            reason,
            d.task_type,
            d.description
        ));
    }
    lines.join("\n")
}

//! Plain-text rendering of an analysis

use crate::stats::TierStats;
use crate::tracker::UsageAnalysis;

pub fn render_report(analysis: &UsageAnalysis) -> String {
    let stats = &analysis.stats;
    let mut sections = vec![format!(
        "=== Model Usage Analysis (Last {} days) ===",
        stats.window_days
    )];

    if !analysis.history_found {
        sections.push(
            "\nNo usage data found. Usage is recorded as tasks run through the router."
                .to_string(),
        );
        return sections.join("\n");
    }

    sections.push(tier_section("PREMIUM", &stats.premium));
    sections.push(tier_section("STANDARD", &stats.standard));

    let mut distribution = String::from("\nTask Distribution:");
    if stats.task_distribution.is_empty() {
        distribution.push_str("\n  (no tasks in window)");
    }
    for (task, counts) in &stats.task_distribution {
        distribution.push_str(&format!(
            "\n  {}: PREMIUM={}, STANDARD={}",
            task, counts.premium, counts.standard
        ));
    }
    sections.push(distribution);

    let mut opportunities = String::from("\nOptimization Opportunities:");
    if analysis.recommendations.is_empty() {
        opportunities.push_str("\n  No specific recommendations at this time");
    }
    for rec in &analysis.recommendations {
        opportunities.push_str(&format!("\n  - {}", rec));
    }
    sections.push(opportunities);

    if stats.potential_savings > 0 {
        sections.push(format!(
            "\nPREMIUM requests that could use STANDARD: {}",
            stats.potential_savings
        ));
    }

    sections.join("\n")
}

fn tier_section(name: &str, tier: &TierStats) -> String {
    format!(
        "\n{} Usage:\n  Requests: {}\n  Success Rate: {:.2}%\n  Total Tokens: {}",
        name,
        tier.count,
        tier.success_rate * 100.0,
        group_thousands(tier.total_tokens)
    )
}

/// Format `n` with comma thousands separators
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

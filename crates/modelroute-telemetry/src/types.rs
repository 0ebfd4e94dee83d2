//! Telemetry record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model tier a task is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelTier {
    /// Lower cost, lower capability
    #[serde(rename = "STANDARD")]
    Standard,
    /// Higher cost, higher capability
    #[serde(rename = "PREMIUM")]
    Premium,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Standard => "STANDARD",
            ModelTier::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Why the router picked a tier. A score exists only for complexity-scored decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Selection {
    TriggerWord,
    ComplexityScore { score: i32 },
}

impl Selection {
    pub fn reason(&self) -> &'static str {
        match self {
            Selection::TriggerWord => "trigger_word",
            Selection::ComplexityScore { .. } => "complexity_score",
        }
    }

    pub fn score(&self) -> Option<i32> {
        match self {
            Selection::TriggerWord => None,
            Selection::ComplexityScore { score } => Some(*score),
        }
    }
}

/// One routing decision, appended to the decision log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub task_type: String,
    pub tier: ModelTier,
    /// Concrete model id the tier resolved to
    #[serde(default)]
    pub model: String,
    #[serde(flatten)]
    pub selection: Selection,
    /// Description prefix, truncated by the router
    pub description: String,
}

/// One completed task, appended to the usage log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    /// Free-form model identifier, normally the concrete model name
    pub model: String,
    pub task_type: String,
    #[serde(default)]
    pub tokens_used: u64,
    pub success: bool,
    pub duration_seconds: f64,
}

/// Accepts RFC 3339 timestamps and naive ISO-8601 timestamps (read as UTC)
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| D::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}

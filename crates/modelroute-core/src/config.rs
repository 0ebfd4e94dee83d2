//! Routing policy, model ids and analysis settings

use crate::error::ConfigError;
use crate::types::TaskComplexity;
use modelroute_telemetry::{ModelTier, Paths};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TRIGGER_WORDS: &[&str] = &[
    "architect",
    "orchestrate",
    "design",
    "strategy",
    "debug",
    "complex",
    "critical",
    "production",
    "refactor",
    "analyze system",
    "review architecture",
];

const DEFAULT_TASK_COMPLEXITY: &[(&str, TaskComplexity)] = &[
    ("file_operation", TaskComplexity::Simple),
    ("code_format", TaskComplexity::Simple),
    ("log_analysis", TaskComplexity::Simple),
    ("generate_summary", TaskComplexity::Simple),
    ("write_test", TaskComplexity::Basic),
    ("update_docs", TaskComplexity::Basic),
    ("sql_query", TaskComplexity::Basic),
    ("code_generation", TaskComplexity::Moderate),
    ("bug_fix", TaskComplexity::Moderate),
    ("code_review", TaskComplexity::Moderate),
    ("system_design", TaskComplexity::Complex),
    ("debug_complex", TaskComplexity::Complex),
    ("architecture_review", TaskComplexity::Critical),
    ("orchestration", TaskComplexity::Critical),
];

const DEFAULT_CHEAP_TASKS: &[&str] = &["log_analysis", "generate_summary", "file_operation"];

/// Router policy data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Score at or above which a task goes to PREMIUM
    pub threshold: i32,

    /// Case-insensitive substrings that force PREMIUM
    pub trigger_words: Vec<String>,

    /// Base complexity per task type; unknown types are MODERATE
    pub task_complexity: BTreeMap<String, TaskComplexity>,

    /// Characters of the description kept in decision records
    pub description_limit: usize,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self {
            threshold: 4,
            trigger_words: DEFAULT_TRIGGER_WORDS.iter().map(|w| w.to_string()).collect(),
            task_complexity: DEFAULT_TASK_COMPLEXITY
                .iter()
                .map(|(task, complexity)| (task.to_string(), *complexity))
                .collect(),
            description_limit: 100,
        }
    }

    pub fn complexity_of(&self, task_type: &str) -> TaskComplexity {
        self.task_complexity
            .get(task_type)
            .copied()
            .unwrap_or(TaskComplexity::Moderate)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Concrete model ids behind each tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Models {
    pub premium: String,
    pub standard: String,
}

impl Models {
    pub fn new() -> Self {
        Self {
            premium: "claude-opus-4-20250514".to_string(),
            standard: "claude-3-5-sonnet-20241022".to_string(),
        }
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Premium => &self.premium,
            ModelTier::Standard => &self.standard,
        }
    }

    /// Map a free-form model id from a usage record back to a tier
    pub fn tier_of(&self, model: &str) -> ModelTier {
        if model == self.premium {
            return ModelTier::Premium;
        }
        if model == self.standard {
            return ModelTier::Standard;
        }
        let lower = model.to_lowercase();
        if lower.contains("opus") || lower.contains("premium") {
            ModelTier::Premium
        } else {
            ModelTier::Standard
        }
    }
}

impl Default for Models {
    fn default() -> Self {
        Self::new()
    }
}

/// Usage analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Task types that are cheap by nature; PREMIUM-heavy use of them counts as potential savings
    pub cheap_tasks: Vec<String>,

    /// Potential savings above this produce a recommendation
    pub savings_threshold: u64,

    /// STANDARD success rate above this suggests expanding STANDARD usage
    pub standard_success_threshold: f64,

    /// Trailing window used when none is given
    pub default_days: u32,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self {
            cheap_tasks: DEFAULT_CHEAP_TASKS.iter().map(|t| t.to_string()).collect(),
            savings_threshold: 10,
            standard_success_threshold: 0.95,
            default_days: 7,
        }
    }

    pub fn is_cheap(&self, task_type: &str) -> bool {
        self.cheap_tasks.iter().any(|t| t == task_type)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything loaded from the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub router: RouterConfig,
    pub models: Models,
    pub analysis: AnalysisConfig,
}

impl Settings {
    /// Load settings for the resolved paths
    ///
    /// A missing default settings file yields defaults; a missing file that
    /// was named explicitly is an error.
    pub fn load(paths: &Paths) -> Result<Self, ConfigError> {
        match &paths.settings_file {
            Some(path) if path.exists() || paths.settings_explicit() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

//! Path resolution for log and settings files

use std::path::PathBuf;

/// Overrides the decision log location
pub const DECISION_LOG_ENV: &str = "MODELROUTE_DECISION_LOG";
/// Overrides the usage log location
pub const USAGE_LOG_ENV: &str = "MODELROUTE_USAGE_LOG";
/// Overrides the settings file location
pub const CONFIG_ENV: &str = "MODELROUTE_CONFIG";
/// Shared default for both logs, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "./usage_metrics.jsonl";

/// Resolves the files the router and analyzer read and write
#[derive(Debug, Clone)]
pub struct Paths {
    pub decision_log: PathBuf,
    pub usage_log: PathBuf,
    /// `None` when no override is set and the home directory is unknown
    pub settings_file: Option<PathBuf>,
    settings_explicit: bool,
}

impl Paths {
    /// Resolve paths from the process environment
    pub fn from_env() -> Self {
        let decision_log = env_path(DECISION_LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILE.into());
        let usage_log = env_path(USAGE_LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILE.into());

        let (settings_file, settings_explicit) = match env_path(CONFIG_ENV) {
            Some(path) => (Some(path), true),
            None => (
                dirs::home_dir().map(|home| home.join(".claude").join("modelroute.json")),
                false,
            ),
        };

        Self {
            decision_log,
            usage_log,
            settings_file,
            settings_explicit,
        }
    }

    /// Paths rooted in one directory, with both logs sharing a file
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let log = dir.join("usage_metrics.jsonl");
        Self {
            decision_log: log.clone(),
            usage_log: log,
            settings_file: Some(dir.join("modelroute.json")),
            settings_explicit: false,
        }
    }

    /// Whether the settings file was named explicitly; a missing explicit file is an error
    pub fn settings_explicit(&self) -> bool {
        self.settings_explicit
    }

    /// Whether both logs resolve to the same file
    pub fn shared_log(&self) -> bool {
        self.decision_log == self.usage_log
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

//! Error types for routing, configuration and task execution

use modelroute_telemetry::ModelTier;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    /// A context signal had the wrong type or range
    #[error("invalid context signal `{key}`: {reason}")]
    InvalidContext { key: String, reason: String },
}

impl RouterError {
    pub(crate) fn invalid_context(key: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidContext {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The final failure of a task after any escalation
#[derive(Debug, Error)]
#[error("task failed on {tier} tier after {attempts} attempt(s)")]
pub struct TaskFailure {
    /// Tier of the attempt that failed last
    pub tier: ModelTier,
    pub attempts: u8,
    #[source]
    pub source: anyhow::Error,
}

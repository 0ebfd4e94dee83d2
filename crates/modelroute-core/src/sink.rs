//! Best-effort append-only sinks for decision and usage records

use modelroute_telemetry::{append_jsonl, DecisionRecord, UsageRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Receives routing decisions. Implementations must not fail the caller.
pub trait DecisionSink: Send + Sync {
    fn append(&self, record: &DecisionRecord);
}

/// Receives completed-task usage records. Implementations must not fail the caller.
pub trait UsageSink: Send + Sync {
    fn append(&self, record: &UsageRecord);
}

/// A swallowed write failure, reported on the diagnostics channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug)]
struct JsonlAppender {
    path: PathBuf,
    diagnostics: Option<Sender<LogFailure>>,
}

impl JsonlAppender {
    fn append<T: Serialize>(&self, record: &T) {
        if let Err(e) = append_jsonl(&self.path, record) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to append log record");
            if let Some(tx) = &self.diagnostics {
                let _ = tx.send(LogFailure {
                    path: self.path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// JSONL decision log
#[derive(Debug)]
pub struct DecisionLog {
    inner: JsonlAppender,
}

impl DecisionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: JsonlAppender {
                path: path.into(),
                diagnostics: None,
            },
        }
    }

    /// Report write failures on `tx` in addition to the tracing warning
    pub fn with_diagnostics(mut self, tx: Sender<LogFailure>) -> Self {
        self.inner.diagnostics = Some(tx);
        self
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl DecisionSink for DecisionLog {
    fn append(&self, record: &DecisionRecord) {
        self.inner.append(record);
    }
}

/// JSONL usage log
#[derive(Debug)]
pub struct UsageLog {
    inner: JsonlAppender,
}

impl UsageLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: JsonlAppender {
                path: path.into(),
                diagnostics: None,
            },
        }
    }

    /// Report write failures on `tx` in addition to the tracing warning
    pub fn with_diagnostics(mut self, tx: Sender<LogFailure>) -> Self {
        self.inner.diagnostics = Some(tx);
        self
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl UsageSink for UsageLog {
    fn append(&self, record: &UsageRecord) {
        self.inner.append(record);
    }
}

//! Telemetry record types and append-only JSONL storage for routing decisions and usage

mod io;
mod paths;
mod types;

pub use io::{append_jsonl, atomic_write, read_jsonl, scan_jsonl, JsonlScan};
pub use paths::{Paths, CONFIG_ENV, DECISION_LOG_ENV, DEFAULT_LOG_FILE, USAGE_LOG_ENV};
pub use types::{DecisionRecord, ModelTier, Selection, UsageRecord};

//! Task descriptors, complexity tiers and context signals

use crate::error::RouterError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordinal complexity of a task type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskComplexity {
    /// File ops, formatting
    Simple = 1,
    /// Tests, docs, basic code
    Basic = 2,
    /// Standard development
    Moderate = 3,
    /// Architecture, hard debugging
    Complex = 4,
    /// Production, orchestration
    Critical = 5,
}

impl TaskComplexity {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Contextual signals that raise a task's complexity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskContext {
    /// Prior attempts at this task
    pub retry_count: u64,
    /// Errors seen so far
    pub errors_count: u64,
    /// Task touches a production environment
    pub production: bool,
    /// Files in scope
    pub file_count: u64,
    /// Lines in scope
    pub line_count: u64,
}

impl TaskContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retry_count(mut self, n: u64) -> Self {
        self.retry_count = n;
        self
    }

    pub fn with_errors_count(mut self, n: u64) -> Self {
        self.errors_count = n;
        self
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn with_file_count(mut self, n: u64) -> Self {
        self.file_count = n;
        self
    }

    pub fn with_line_count(mut self, n: u64) -> Self {
        self.line_count = n;
        self
    }

    /// Parse signals from a loosely typed map
    ///
    /// Absent and `null` signals default to zero/false. Keys that are not
    /// routing signals are ignored. A signal of the wrong type is rejected
    /// rather than coerced.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, RouterError> {
        Ok(Self {
            retry_count: count(map, "retry_count")?,
            errors_count: count(map, "errors_count")?,
            production: flag(map, "production")?,
            file_count: count(map, "file_count")?,
            line_count: count(map, "line_count")?,
        })
    }

    /// Parse signals from a JSON value, which must be an object or `null`
    pub fn from_json(value: &Value) -> Result<Self, RouterError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Self::from_map(map),
            other => Err(RouterError::invalid_context(
                "context",
                format!("expected an object, got {}", json_kind(other)),
            )),
        }
    }

    /// Additive score adjustment; every signal can only raise the score
    pub fn adjustment(&self) -> i32 {
        let mut score = 0;
        if self.retry_count > 1 {
            score += 1;
        }
        if self.errors_count > 2 {
            score += 2;
        }
        if self.production {
            score += 2;
        }
        if self.file_count > 10 {
            score += 1;
        }
        if self.line_count > 1000 {
            score += 1;
        }
        score
    }
}

/// A task submitted for routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub task_type: String,
    pub description: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl TaskDescriptor {
    pub fn new(task_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            description: description.into(),
            context: Map::new(),
        }
    }

    pub fn with_signal(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

fn count(map: &Map<String, Value>, key: &str) -> Result<u64, RouterError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            RouterError::invalid_context(key, format!("expected a non-negative integer, got {n}"))
        }),
        Some(other) => Err(RouterError::invalid_context(
            key,
            format!("expected a non-negative integer, got {}", json_kind(other)),
        )),
    }
}

fn flag(map: &Map<String, Value>, key: &str) -> Result<bool, RouterError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(RouterError::invalid_context(
            key,
            format!("expected a boolean, got {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

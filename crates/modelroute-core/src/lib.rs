//! Model-tier routing, decision logging and usage-tracked task execution

mod agent;
mod config;
mod error;
mod router;
mod sink;
mod types;

pub use agent::{Attempt, ExecuteOptions, ModelAwareAgent};
pub use config::{AnalysisConfig, Models, RouterConfig, Settings};
pub use error::{ConfigError, RouterError, TaskFailure};
pub use router::{ModelRouter, RoutingDecision};
pub use sink::{DecisionLog, DecisionSink, LogFailure, UsageLog, UsageSink};
pub use types::{TaskComplexity, TaskContext, TaskDescriptor};

pub use modelroute_telemetry::{DecisionRecord, ModelTier, Selection, UsageRecord};

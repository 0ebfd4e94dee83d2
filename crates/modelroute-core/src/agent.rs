//! Task execution with tier selection, one-step escalation and usage logging

use crate::error::{RouterError, TaskFailure};
use crate::router::ModelRouter;
use crate::sink::UsageSink;
use crate::types::TaskContext;
use chrono::Utc;
use modelroute_telemetry::{ModelTier, UsageRecord};
use serde_json::Value;
use std::time::Instant;

/// One invocation of a task function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub tier: ModelTier,
    /// Concrete model id for `tier`
    pub model: String,
    /// 1 for the first attempt, 2 for the escalated one
    pub number: u8,
}

/// Per-call execution options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub context: TaskContext,
    /// Retry a failed STANDARD attempt once on PREMIUM
    pub allow_upgrade: bool,
}

impl ExecuteOptions {
    pub fn new(context: TaskContext) -> Self {
        Self {
            context,
            allow_upgrade: true,
        }
    }

    pub fn without_upgrade(mut self) -> Self {
        self.allow_upgrade = false;
        self
    }

    /// Parse routing signals plus the `allow_upgrade` flag from a JSON object
    pub fn from_json(value: &Value) -> Result<Self, RouterError> {
        let context = TaskContext::from_json(value)?;
        let allow_upgrade = match value.get("allow_upgrade") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(RouterError::InvalidContext {
                    key: "allow_upgrade".to_string(),
                    reason: "expected a boolean".to_string(),
                })
            }
        };
        Ok(Self {
            context,
            allow_upgrade,
        })
    }
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self::new(TaskContext::default())
    }
}

/// Agent that routes each task to a tier, runs it, and records its usage
#[derive(Debug)]
pub struct ModelAwareAgent<U: UsageSink> {
    name: String,
    router: ModelRouter,
    usage: U,
    pinned: Option<ModelTier>,
}

impl<U: UsageSink> ModelAwareAgent<U> {
    pub fn new(name: impl Into<String>, router: ModelRouter, usage: U) -> Self {
        Self {
            name: name.into(),
            router,
            usage,
            pinned: None,
        }
    }

    /// Always start on `tier`, bypassing the router
    pub fn pinned(mut self, tier: ModelTier) -> Self {
        self.pinned = Some(tier);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    pub fn select_model_for_task(
        &self,
        task_type: &str,
        description: &str,
        context: &TaskContext,
    ) -> ModelTier {
        match self.pinned {
            Some(tier) => tier,
            None => self
                .router
                .select_with_context(task_type, description, context),
        }
    }

    /// Run `task_fn` on the selected tier; token usage is recorded as zero
    pub fn execute_with_model<T, F>(
        &self,
        task_type: &str,
        description: &str,
        options: &ExecuteOptions,
        mut task_fn: F,
    ) -> Result<T, TaskFailure>
    where
        F: FnMut(&Attempt) -> anyhow::Result<T>,
    {
        self.execute_metered(task_type, description, options, |attempt| {
            task_fn(attempt).map(|value| (value, 0))
        })
    }

    /// Run `task_fn` on the selected tier; `task_fn` reports tokens used alongside its result
    pub fn execute_metered<T, F>(
        &self,
        task_type: &str,
        description: &str,
        options: &ExecuteOptions,
        mut task_fn: F,
    ) -> Result<T, TaskFailure>
    where
        F: FnMut(&Attempt) -> anyhow::Result<(T, u64)>,
    {
        let mut tier = self.select_model_for_task(task_type, description, &options.context);
        let mut number = 0u8;
        let start = Instant::now();

        let outcome = loop {
            number += 1;
            let attempt = Attempt {
                tier,
                model: self.router.models().model_for(tier).to_string(),
                number,
            };
            match task_fn(&attempt) {
                Ok(output) => break Ok(output),
                Err(e) if number == 1 && tier == ModelTier::Standard && options.allow_upgrade => {
                    tracing::debug!(
                        agent = %self.name,
                        task_type,
                        error = %e,
                        "standard attempt failed, escalating to premium"
                    );
                    tier = ModelTier::Premium;
                }
                Err(e) => break Err(e),
            }
        };

        let duration_seconds = start.elapsed().as_secs_f64();
        let (success, tokens_used) = match &outcome {
            Ok((_, tokens)) => (true, *tokens),
            Err(_) => (false, 0),
        };

        self.usage.append(&UsageRecord {
            timestamp: Utc::now(),
            model: self.router.models().model_for(tier).to_string(),
            task_type: task_type.to_string(),
            tokens_used,
            success,
            duration_seconds,
        });

        outcome
            .map(|(value, _)| value)
            .map_err(|source| TaskFailure {
                tier,
                attempts: number,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Models, RouterConfig};
    use crate::sink::DecisionSink;
    use anyhow::anyhow;
    use modelroute_telemetry::DecisionRecord;
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};

    struct Discard;

    impl DecisionSink for Discard {
        fn append(&self, _record: &DecisionRecord) {}
    }

    #[derive(Clone, Default)]
    struct Usage(Arc<Mutex<Vec<UsageRecord>>>);

    impl UsageSink for Usage {
        fn append(&self, record: &UsageRecord) {
            self.0.lock().unwrap().push(record.clone());
        }
    }

    impl Usage {
        fn records(&self) -> Vec<UsageRecord> {
            self.0.lock().unwrap().clone()
        }
    }

    fn agent() -> (ModelAwareAgent<Usage>, Usage) {
        let usage = Usage::default();
        let router = ModelRouter::new(RouterConfig::new(), Models::new(), Discard);
        (ModelAwareAgent::new("tester", router, usage.clone()), usage)
    }

    #[test]
    fn test_success_on_first_attempt() {
        let (agent, usage) = agent();
        let result = agent
            .execute_metered(
                "generate_summary",
                "daily summary",
                &ExecuteOptions::default(),
                |attempt| Ok((format!("done with {}", attempt.model), 321)),
            )
            .unwrap();
        assert_eq!(result, "done with claude-3-5-sonnet-20241022");

        let records = usage.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].success);
        assert_eq!(records[0].tokens_used, 321);
        assert_eq!(records[0].model, "claude-3-5-sonnet-20241022");
    }

    #[test]
    fn test_standard_failure_escalates_once() {
        let (agent, usage) = agent();
        let seen = RefCell::new(Vec::new());
        let result = agent.execute_with_model(
            "bug_fix",
            "fix pagination",
            &ExecuteOptions::default(),
            |attempt| {
                seen.borrow_mut().push(attempt.clone());
                if attempt.tier == ModelTier::Standard {
                    Err(anyhow!("standard gave up"))
                } else {
                    Ok(42)
                }
            },
        );
        assert_eq!(result.unwrap(), 42);

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].tier, ModelTier::Standard);
        assert_eq!(seen[1].tier, ModelTier::Premium);
        assert_eq!(seen[1].number, 2);

        let records = usage.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model, "claude-opus-4-20250514");
        assert!(records[0].success);
    }

    #[test]
    fn test_always_failing_task_stops_after_premium() {
        let (agent, usage) = agent();
        let mut calls = 0;
        let err = agent
            .execute_with_model::<(), _>(
                "bug_fix",
                "fix pagination",
                &ExecuteOptions::default(),
                |attempt| {
                    calls += 1;
                    Err(anyhow!("{} failed", attempt.tier))
                },
            )
            .unwrap_err();

        assert_eq!(calls, 2);
        assert_eq!(err.tier, ModelTier::Premium);
        assert_eq!(err.attempts, 2);
        assert_eq!(err.source.to_string(), "PREMIUM failed");

        let records = usage.records();
        assert_eq!(records.len(), 1);
        assert!(!records[0].success);
        assert_eq!(records[0].tokens_used, 0);
        assert_eq!(records[0].model, "claude-opus-4-20250514");
    }

    #[test]
    fn test_premium_failure_is_terminal() {
        let (agent, usage) = agent();
        let mut calls = 0;
        let err = agent
            .execute_with_model::<(), _>(
                "orchestration",
                "fan out the jobs",
                &ExecuteOptions::default(),
                |_| {
                    calls += 1;
                    Err(anyhow!("boom"))
                },
            )
            .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.tier, ModelTier::Premium);
        assert_eq!(err.attempts, 1);
        assert_eq!(usage.records().len(), 1);
    }

    #[test]
    fn test_upgrade_disabled() {
        let (agent, usage) = agent();
        let mut calls = 0;
        let err = agent
            .execute_with_model::<(), _>(
                "code_format",
                "rustfmt",
                &ExecuteOptions::default().without_upgrade(),
                |_| {
                    calls += 1;
                    Err(anyhow!("nope"))
                },
            )
            .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.tier, ModelTier::Standard);
        assert_eq!(usage.records()[0].model, "claude-3-5-sonnet-20241022");
    }

    #[derive(Clone, Default)]
    struct Counted(Arc<Mutex<usize>>);

    impl DecisionSink for Counted {
        fn append(&self, _record: &DecisionRecord) {
            *self.0.lock().unwrap() += 1;
        }
    }

    #[test]
    fn test_pinned_tier_bypasses_router() {
        let (agent, _) = agent();
        let agent = agent.pinned(ModelTier::Premium);
        assert_eq!(agent.name(), "tester");
        let tier = agent.select_model_for_task(
            "code_format",
            "rustfmt",
            &TaskContext::default(),
        );
        assert_eq!(tier, ModelTier::Premium);
    }

    #[test]
    fn test_pinned_standard_still_escalates_without_decisions() {
        let decisions = Counted::default();
        let usage = Usage::default();
        let router = ModelRouter::new(RouterConfig::new(), Models::new(), decisions.clone());
        let agent = ModelAwareAgent::new("pinned", router, usage.clone()).pinned(ModelTier::Standard);

        let tiers = RefCell::new(Vec::new());
        let result = agent.execute_with_model(
            "architecture_design",
            "redesign the storage layer",
            &ExecuteOptions::default(),
            |attempt| {
                tiers.borrow_mut().push(attempt.tier);
                if attempt.tier == ModelTier::Standard {
                    Err(anyhow!("standard gave up"))
                } else {
                    Ok("done")
                }
            },
        );
        assert_eq!(result.unwrap(), "done");
        assert_eq!(tiers.into_inner(), vec![ModelTier::Standard, ModelTier::Premium]);
        assert_eq!(*decisions.0.lock().unwrap(), 0);

        let records = usage.records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].model,
            agent.router().models().model_for(ModelTier::Premium)
        );
        assert_eq!(records[0].model, "claude-opus-4-20250514");
    }

    #[test]
    fn test_options_from_json() {
        let options = ExecuteOptions::from_json(&serde_json::json!({
            "production": true,
            "allow_upgrade": false,
        }))
        .unwrap();
        assert!(options.context.production);
        assert!(!options.allow_upgrade);

        assert!(ExecuteOptions::from_json(&serde_json::json!({ "allow_upgrade": "no" })).is_err());
        assert!(ExecuteOptions::default().allow_upgrade);
    }
}

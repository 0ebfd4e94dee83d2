//! Heuristic model-tier router

use crate::config::{Models, RouterConfig, Settings};
use crate::error::RouterError;
use crate::sink::{DecisionLog, DecisionSink};
use crate::types::{TaskContext, TaskDescriptor};
use chrono::Utc;
use modelroute_telemetry::{DecisionRecord, ModelTier, Paths, Selection};
use serde_json::{Map, Value};

/// Outcome of routing one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingDecision {
    pub tier: ModelTier,
    pub selection: Selection,
}

pub struct ModelRouter {
    config: RouterConfig,
    models: Models,
    triggers: Vec<String>,
    sink: Box<dyn DecisionSink>,
}

impl ModelRouter {
    pub fn new(config: RouterConfig, models: Models, sink: impl DecisionSink + 'static) -> Self {
        let triggers = config
            .trigger_words
            .iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            config,
            models,
            triggers,
            sink: Box::new(sink),
        }
    }

    /// Router logging decisions to the configured decision log
    pub fn from_settings(settings: &Settings, paths: &Paths) -> Self {
        Self::new(
            settings.router.clone(),
            settings.models.clone(),
            DecisionLog::new(&paths.decision_log),
        )
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn models(&self) -> &Models {
        &self.models
    }

    /// Pick a tier from loosely typed context signals and log the decision
    pub fn select_model(
        &self,
        task_type: &str,
        description: &str,
        context: Option<&Map<String, Value>>,
    ) -> Result<ModelTier, RouterError> {
        let context = match context {
            Some(map) => TaskContext::from_map(map)?,
            None => TaskContext::default(),
        };
        Ok(self.select_with_context(task_type, description, &context))
    }

    pub fn route(&self, task: &TaskDescriptor) -> Result<ModelTier, RouterError> {
        self.select_model(&task.task_type, &task.description, Some(&task.context))
    }

    /// Pick a tier from typed context signals and log the decision
    pub fn select_with_context(
        &self,
        task_type: &str,
        description: &str,
        context: &TaskContext,
    ) -> ModelTier {
        self.select_decision(task_type, description, context).tier
    }

    /// Like [`select_with_context`](Self::select_with_context), returning the full decision
    pub fn select_decision(
        &self,
        task_type: &str,
        description: &str,
        context: &TaskContext,
    ) -> RoutingDecision {
        let decision = self.decide(task_type, description, context);
        tracing::debug!(
            task_type,
            tier = %decision.tier,
            reason = decision.selection.reason(),
            score = ?decision.selection.score(),
            "routed task"
        );
        self.sink.append(&self.record(task_type, description, &decision));
        decision
    }

    /// Routing decision without any side effect
    pub fn decide(
        &self,
        task_type: &str,
        description: &str,
        context: &TaskContext,
    ) -> RoutingDecision {
        if self.has_trigger_word(description) {
            return RoutingDecision {
                tier: ModelTier::Premium,
                selection: Selection::TriggerWord,
            };
        }

        let score = self.config.complexity_of(task_type).value() + context.adjustment();
        let tier = if score >= self.config.threshold {
            ModelTier::Premium
        } else {
            ModelTier::Standard
        };

        RoutingDecision {
            tier,
            selection: Selection::ComplexityScore { score },
        }
    }

    fn has_trigger_word(&self, description: &str) -> bool {
        let lower = description.to_lowercase();
        self.triggers.iter().any(|t| lower.contains(t.as_str()))
    }

    fn record(
        &self,
        task_type: &str,
        description: &str,
        decision: &RoutingDecision,
    ) -> DecisionRecord {
        DecisionRecord {
            timestamp: Utc::now(),
            task_type: task_type.to_string(),
            tier: decision.tier,
            model: self.models.model_for(decision.tier).to_string(),
            selection: decision.selection,
            description: description
                .chars()
                .take(self.config.description_limit)
                .collect(),
        }
    }
}

impl std::fmt::Debug for ModelRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRouter")
            .field("config", &self.config)
            .field("models", &self.models)
            .finish_non_exhaustive()
    }
}

//! Dataset evaluation configuration.

use advisor_domain::{Evaluator, Model};

/// Settings for replaying a dataset and scoring the runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationConfig {
    /// Dataset replayed when the caller names none
    pub dataset: String,
    /// Prefix of the per-invocation batch run name
    pub run_name_prefix: String,
    /// Evaluators applied to every run, in order
    pub evaluators: Vec<Evaluator>,
    /// Model for evaluator calls; independent of any advisor override
    pub evaluator_model: Model,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            dataset: "Management Agent".to_string(),
            run_name_prefix: "management-agent".to_string(),
            evaluators: Evaluator::defaults(),
            evaluator_model: Model::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    pub fn with_evaluators(mut self, evaluators: Vec<Evaluator>) -> Self {
        self.evaluators = evaluators;
        self
    }

    pub fn with_evaluator_model(mut self, model: Model) -> Self {
        self.evaluator_model = model;
        self
    }

    pub fn with_run_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.run_name_prefix = prefix.into();
        self
    }
}

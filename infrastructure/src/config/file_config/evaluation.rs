//! Dataset evaluation from TOML (`[evaluation]` section)

use advisor_domain::{ConfigIssue, ConfigIssueCode, Evaluator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dataset evaluation settings
///
/// # Example
///
/// ```toml
/// [evaluation]
/// dataset = "Management Agent"
/// run_name_prefix = "management-agent"
///
/// [[evaluation.evaluators]]
/// name = "Helpfulness"
/// prompt = "evaluate_management_agent_helpfulness"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    pub dataset: String,
    pub run_name_prefix: String,
    /// Score name and text prompt per evaluator, applied in order
    pub evaluators: Vec<Evaluator>,
}

impl Default for FileEvaluationConfig {
    fn default() -> Self {
        Self {
            dataset: "Management Agent".to_string(),
            run_name_prefix: "management-agent".to_string(),
            evaluators: Evaluator::defaults(),
        }
    }
}

impl FileEvaluationConfig {
    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.dataset.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyName {
                    field: "evaluation.dataset".to_string(),
                },
                "evaluation.dataset: dataset name cannot be empty",
            ));
        }

        if self.evaluators.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoEvaluators,
                "evaluation.evaluators: at least one evaluator is required",
            ));
        }

        let mut seen = HashSet::new();
        for (i, evaluator) in self.evaluators.iter().enumerate() {
            for (field, value) in [("name", &evaluator.name), ("prompt", &evaluator.prompt)] {
                if value.trim().is_empty() {
                    let field = format!("evaluation.evaluators[{}].{}", i, field);
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyName {
                            field: field.clone(),
                        },
                        format!("{}: cannot be empty", field),
                    ));
                }
            }
            if !seen.insert(evaluator.name.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateEvaluator {
                        name: evaluator.name.clone(),
                    },
                    format!(
                        "evaluation.evaluators: '{}' is listed more than once",
                        evaluator.name
                    ),
                ));
            }
        }

        issues
    }
}

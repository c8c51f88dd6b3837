//! Model selection from TOML (`[models]` section)

use advisor_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model selection from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// default = "gemini-2.0-flash-001"    # Advisors and summarizer
/// evaluator = "gemini-2.5-flash"      # Dataset evaluators
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for advisor and summary calls when a request names none
    pub default: String,
    /// Model for evaluator calls (falls back to `default`)
    pub evaluator: Option<String>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            default: Model::default().to_string(),
            evaluator: None,
        }
    }
}

impl FileModelsConfig {
    pub fn default_model(&self) -> Model {
        Model::from_id(self.default.trim())
    }

    pub fn evaluator_model(&self) -> Model {
        Model::from_override(self.evaluator.as_deref()).unwrap_or_else(|| self.default_model())
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.default.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyName {
                    field: "models.default".to_string(),
                },
                "models.default: model name cannot be empty",
            ));
        }
        if matches!(&self.evaluator, Some(s) if s.trim().is_empty()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyName {
                    field: "models.evaluator".to_string(),
                },
                "models.evaluator: model name cannot be empty",
            ));
        }
        issues
    }
}

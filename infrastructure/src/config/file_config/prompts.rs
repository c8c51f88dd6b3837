//! Prompt names from TOML (`[prompts]` section)

use advisor_domain::{AdvisorSlot, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Names of the chat prompts an advice run resolves
///
/// # Example
///
/// ```toml
/// [prompts]
/// advisors = ["manager_1", "manager_2", "manager_3", "manager_4", "manager_5"]
/// summary = "summary_advices"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptsConfig {
    /// One prompt per advisor slot, in slot order
    pub advisors: Vec<String>,
    pub summary: String,
}

impl Default for FilePromptsConfig {
    fn default() -> Self {
        Self {
            advisors: AdvisorSlot::ALL
                .iter()
                .map(|slot| format!("manager_{}", slot.ordinal()))
                .collect(),
            summary: "summary_advices".to_string(),
        }
    }
}

impl FilePromptsConfig {
    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.advisors.len() != AdvisorSlot::COUNT {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::AdvisorCount {
                    found: self.advisors.len(),
                },
                format!(
                    "prompts.advisors: expected {} prompt names, found {}",
                    AdvisorSlot::COUNT,
                    self.advisors.len()
                ),
            ));
        }

        for (i, name) in self.advisors.iter().enumerate() {
            if name.trim().is_empty() {
                let field = format!("prompts.advisors[{}]", i);
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyName {
                        field: field.clone(),
                    },
                    format!("{}: prompt name cannot be empty", field),
                ));
            }
        }

        if self.summary.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyName {
                    field: "prompts.summary".to_string(),
                },
                "prompts.summary: prompt name cannot be empty",
            ));
        }

        issues
    }
}

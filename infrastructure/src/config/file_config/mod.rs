//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod evaluation;
mod gemini;
mod langfuse;
mod models;
mod output;
mod prompts;
mod server;
mod trace;

pub use evaluation::FileEvaluationConfig;
pub use gemini::FileGeminiConfig;
pub use langfuse::{FileLangfuseConfig, LangfuseCredentials};
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use prompts::FilePromptsConfig;
pub use server::FileServerConfig;
pub use trace::FileTraceConfig;

use advisor_application::{AdvisorConfig, EvaluationConfig};
use advisor_domain::{ConfigIssue, DomainError};
use serde::{Deserialize, Serialize};

/// Reads a non-blank environment variable
fn lookup_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Advisor/summary and evaluator models
    pub models: FileModelsConfig,
    /// Prompt names for advisors and the summarizer
    pub prompts: FilePromptsConfig,
    /// Dataset replay and evaluators
    pub evaluation: FileEvaluationConfig,
    /// Trace naming
    pub trace: FileTraceConfig,
    /// Generation service
    pub gemini: FileGeminiConfig,
    /// Prompt store, dataset store and trace collector
    pub langfuse: FileLangfuseConfig,
    /// HTTP server
    pub server: FileServerConfig,
    /// Console output
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.issues());
        issues.extend(self.prompts.issues());
        issues.extend(self.evaluation.issues());
        issues.extend(self.gemini.issues());
        issues.extend(self.langfuse.issues());
        if self.trace.name.trim().is_empty() {
            issues.push(ConfigIssue::error(
                advisor_domain::ConfigIssueCode::EmptyName {
                    field: "trace.name".to_string(),
                },
                "trace.name cannot be empty",
            ));
        }
        issues
    }

    /// Advice engine settings
    pub fn advisor_config(&self) -> Result<AdvisorConfig, DomainError> {
        Ok(AdvisorConfig::default()
            .with_advisor_prompts(self.prompts.advisors.clone())?
            .with_summary_prompt(&self.prompts.summary)
            .with_trace_name(&self.trace.name)
            .with_default_model(self.models.default_model()))
    }

    /// Batch evaluator settings
    pub fn evaluation_config(&self) -> EvaluationConfig {
        EvaluationConfig::default()
            .with_dataset(&self.evaluation.dataset)
            .with_run_name_prefix(&self.evaluation.run_name_prefix)
            .with_evaluators(self.evaluation.evaluators.clone())
            .with_evaluator_model(self.models.evaluator_model())
    }
}

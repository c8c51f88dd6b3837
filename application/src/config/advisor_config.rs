//! Advice run configuration.

use advisor_domain::{AdvisorSlot, DomainError, Model};

/// Templates and defaults for the advice engine.
///
/// Advisor prompt names are held in slot order; position `i` backs
/// [`AdvisorSlot::ALL`]`[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// One chat prompt per advisor slot
    pub advisor_prompts: [String; AdvisorSlot::COUNT],
    /// Chat prompt for the summarizer
    pub summary_prompt: String,
    /// Name of the root trace recorded for each run
    pub trace_name: String,
    /// Model for advisor and summary calls when the caller gives none
    pub default_model: Model,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            advisor_prompts: AdvisorSlot::ALL.map(|slot| format!("manager_{}", slot.ordinal())),
            summary_prompt: "summary_advices".to_string(),
            trace_name: "management_agent".to_string(),
            default_model: Model::default(),
        }
    }
}

impl AdvisorConfig {
    /// Builds a config from a list of advisor prompt names, which must have
    /// exactly one entry per slot.
    pub fn with_advisor_prompts(mut self, prompts: Vec<String>) -> Result<Self, DomainError> {
        let found = prompts.len();
        self.advisor_prompts = prompts.try_into().map_err(|_| DomainError::AdvisorCount {
            expected: AdvisorSlot::COUNT,
            found,
        })?;
        Ok(self)
    }

    pub fn with_summary_prompt(mut self, name: impl Into<String>) -> Self {
        self.summary_prompt = name.into();
        self
    }

    pub fn with_trace_name(mut self, name: impl Into<String>) -> Self {
        self.trace_name = name.into();
        self
    }

    pub fn with_default_model(mut self, model: Model) -> Self {
        self.default_model = model;
        self
    }

    /// Prompt name backing `slot`
    pub fn advisor_prompt(&self, slot: AdvisorSlot) -> &str {
        &self.advisor_prompts[slot.index()]
    }
}

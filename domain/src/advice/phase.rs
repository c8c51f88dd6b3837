//! Stages of an advice run

use serde::{Deserialize, Serialize};

/// Phase of an advice run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Fetching advisor and summarizer templates
    ResolvePrompts,
    /// Five advisor calls in parallel
    Advise,
    /// Summarizer call over all advices
    Summarize,
    /// Submitting the trace tree
    Record,
    /// Scoring a run with evaluators
    Evaluate,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::ResolvePrompts => "resolve_prompts",
            Phase::Advise => "advise",
            Phase::Summarize => "summarize",
            Phase::Record => "record",
            Phase::Evaluate => "evaluate",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::ResolvePrompts => "Resolve Prompts",
            Phase::Advise => "Advisors",
            Phase::Summarize => "Summary",
            Phase::Record => "Trace",
            Phase::Evaluate => "Evaluation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

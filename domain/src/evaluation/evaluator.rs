//! Evaluator value object

use serde::{Deserialize, Serialize};

/// Parameter carrying the run's summary into evaluator prompts
pub const LLM_OUTPUT_PARAM: &str = "llm_output";

/// A model-based evaluator: the score name it reports under and the text
/// prompt it is driven by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    pub name: String,
    pub prompt: String,
}

impl Evaluator {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }

    /// Helpfulness and hallucination scoring of management advice
    pub fn defaults() -> Vec<Evaluator> {
        vec![
            Evaluator::new("Helpfulness", "evaluate_management_agent_helpfulness"),
            Evaluator::new("Hallucination", "evaluate_management_agent_hallucination"),
        ]
    }
}

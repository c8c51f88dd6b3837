//! Advice run entities

use super::slot::AdvisorSlot;
use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::generation::result::GenerationResult;
use crate::prompt::{ChatPair, PromptIdentity, PromptParams};
use crate::trace::handle::TraceHandle;
use serde::Serialize;
use serde_json::{Map, Value};

/// Parameter carrying the user's question into every template
pub const USER_INPUT_PARAM: &str = "user_input";

/// One advisor's call: the template it came from, the compiled messages it
/// was sent, and what came back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceRecord {
    pub slot: AdvisorSlot,
    pub prompt: PromptIdentity,
    pub messages: ChatPair,
    pub output: GenerationResult,
}

/// The summarizer call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub prompt: PromptIdentity,
    pub messages: ChatPair,
    pub output: GenerationResult,
}

/// Exactly one advice per slot, held in slot order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advices([AdviceRecord; AdvisorSlot::COUNT]);

impl Advices {
    /// Puts records back into slot order regardless of completion order.
    ///
    /// Fails if any slot is missing or filled twice.
    pub fn assemble(records: Vec<AdviceRecord>) -> Result<Self, DomainError> {
        let mut slots: [Option<AdviceRecord>; AdvisorSlot::COUNT] = Default::default();

        for record in records {
            let entry = &mut slots[record.slot.index()];
            if entry.is_some() {
                return Err(DomainError::DuplicateAdvice(record.slot));
            }
            *entry = Some(record);
        }

        let ordered = slots
            .into_iter()
            .zip(AdvisorSlot::ALL)
            .map(|(record, slot)| record.ok_or(DomainError::MissingAdvice(slot)))
            .collect::<Result<Vec<_>, _>>()?;

        let found = ordered.len();
        let array = ordered
            .try_into()
            .map_err(|_| DomainError::AdvisorCount {
                expected: AdvisorSlot::COUNT,
                found,
            })?;
        Ok(Self(array))
    }

    pub fn get(&self, slot: AdvisorSlot) -> &AdviceRecord {
        &self.0[slot.index()]
    }

    /// Records in slot order
    pub fn iter(&self) -> impl Iterator<Item = &AdviceRecord> {
        self.0.iter()
    }

    /// Summarizer parameters: the user input plus each advice text under its
    /// slot's parameter name
    pub fn summary_params(&self, input_text: &str) -> PromptParams {
        self.iter().fold(
            PromptParams::new().with(USER_INPUT_PARAM, input_text),
            |params, record| params.with(record.slot.param_name(), record.output.content()),
        )
    }

    /// Full advisor results keyed by slot parameter name, in slot order
    pub fn keyed_outputs(&self) -> Value {
        let mut map = Map::new();
        for record in self.iter() {
            map.insert(record.slot.param_name().to_string(), record.output.to_json());
        }
        Value::Object(map)
    }
}

/// Everything an advice run produced, before it is traced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceOutcome {
    pub input_text: String,
    pub model: Model,
    pub is_evaluation: bool,
    pub advices: Advices,
    pub summary: SummaryRecord,
}

impl AdviceOutcome {
    pub fn summary_text(&self) -> &str {
        self.summary.output.content()
    }

    /// Combined cost of all six calls
    pub fn total_cost(&self) -> f64 {
        self.advices
            .iter()
            .map(|a| a.output.total_cost())
            .sum::<f64>()
            + self.summary.output.total_cost()
    }
}

/// A completed and traced advice run (Entity)
///
/// The trace handle belongs to this run only; evaluation scores are attached
/// through it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagementRun {
    #[serde(flatten)]
    outcome: AdviceOutcome,
    trace: TraceHandle,
}

impl ManagementRun {
    pub fn new(outcome: AdviceOutcome, trace: TraceHandle) -> Self {
        Self { outcome, trace }
    }

    pub fn outcome(&self) -> &AdviceOutcome {
        &self.outcome
    }

    pub fn input_text(&self) -> &str {
        &self.outcome.input_text
    }

    pub fn model(&self) -> &Model {
        &self.outcome.model
    }

    pub fn is_evaluation(&self) -> bool {
        self.outcome.is_evaluation
    }

    pub fn advices(&self) -> &Advices {
        &self.outcome.advices
    }

    pub fn summary(&self) -> &SummaryRecord {
        &self.outcome.summary
    }

    pub fn summary_text(&self) -> &str {
        self.outcome.summary_text()
    }

    pub fn trace(&self) -> &TraceHandle {
        &self.trace
    }

    pub fn into_parts(self) -> (AdviceOutcome, TraceHandle) {
        (self.outcome, self.trace)
    }
}

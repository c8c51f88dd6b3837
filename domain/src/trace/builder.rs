//! Builds the trace tree mirroring a completed advice run

use super::records::{GenerationRecord, SpanNode, SpanRecord, TraceRecord};
use super::{ADVICE_SPAN_NAME, EVALUATION_TAG, SUMMARY_GENERATION_NAME, SUMMARY_SPAN_NAME};
use crate::advice::entities::{AdviceOutcome, AdviceRecord, USER_INPUT_PARAM};
use serde::Serialize;
use serde_json::{Value, json};

/// Full trace tree for one run, in submission order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceTree {
    pub trace: TraceRecord,
    pub spans: Vec<SpanNode>,
}

impl TraceTree {
    /// Builds the root trace, the advice span with one generation per
    /// advisor in slot order, and the summary span with the summary
    /// generation.
    pub fn build(outcome: &AdviceOutcome, trace_name: &str) -> Self {
        let trace = TraceRecord {
            name: trace_name.to_string(),
            input: Value::String(outcome.input_text.clone()),
            output: Value::String(outcome.summary_text().to_string()),
            tags: outcome
                .is_evaluation
                .then(|| vec![EVALUATION_TAG.to_string()]),
        };

        let keyed_advices = outcome.advices.keyed_outputs();

        let advice_span = SpanNode {
            span: SpanRecord {
                name: ADVICE_SPAN_NAME.to_string(),
                input: Value::String(outcome.input_text.clone()),
                output: keyed_advices.clone(),
            },
            generations: outcome
                .advices
                .iter()
                .map(|advice| Self::advice_generation(outcome, advice))
                .collect(),
        };

        let summary_span = SpanNode {
            span: SpanRecord {
                name: SUMMARY_SPAN_NAME.to_string(),
                input: keyed_advices.clone(),
                output: Value::String(outcome.summary_text().to_string()),
            },
            generations: vec![Self::summary_generation(outcome, keyed_advices)],
        };

        Self {
            trace,
            spans: vec![advice_span, summary_span],
        }
    }

    /// Number of generation records across all spans
    pub fn generation_count(&self) -> usize {
        self.spans.iter().map(|s| s.generations.len()).sum()
    }

    fn advice_generation(outcome: &AdviceOutcome, advice: &AdviceRecord) -> GenerationRecord {
        let input = json!({
            "name": advice.prompt.name,
            "version": advice.prompt.version,
            USER_INPUT_PARAM: outcome.input_text,
            "system": advice.messages.system,
            "user": advice.messages.user,
        });

        GenerationRecord::for_call(
            advice.slot.generation_name(),
            outcome.model.as_str(),
            advice.prompt.clone(),
            input,
            &advice.output,
        )
    }

    fn summary_generation(outcome: &AdviceOutcome, keyed_advices: Value) -> GenerationRecord {
        let summary = &outcome.summary;

        let mut input = json!({
            "name": summary.prompt.name,
            "version": summary.prompt.version,
            USER_INPUT_PARAM: outcome.input_text,
        });
        if let (Some(obj), Value::Object(advices)) = (input.as_object_mut(), keyed_advices) {
            obj.extend(advices);
            obj.insert("system".to_string(), json!(summary.messages.system));
            obj.insert("user".to_string(), json!(summary.messages.user));
        }

        GenerationRecord::for_call(
            SUMMARY_GENERATION_NAME,
            outcome.model.as_str(),
            summary.prompt.clone(),
            input,
            &summary.output,
        )
    }
}

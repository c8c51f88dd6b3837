//! Record payloads for the three trace levels

use crate::generation::policy::ModelParameters;
use crate::generation::result::GenerationResult;
use crate::prompt::PromptIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Root record of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub name: String,
    pub input: Value,
    pub output: Value,
    /// Absent (not empty) for interactive runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A named phase within a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanRecord {
    pub name: String,
    pub input: Value,
    pub output: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageDetails {
    pub input: u64,
    pub output: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostDetails {
    pub input: f64,
    pub output: f64,
}

/// One model call within a span
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub name: String,
    pub model: String,
    pub model_parameters: ModelParameters,
    pub input: Value,
    pub output: String,
    pub prompt: PromptIdentity,
    pub usage_details: UsageDetails,
    pub cost_details: CostDetails,
    pub start_time: DateTime<Utc>,
    pub completion_start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl GenerationRecord {
    /// Documents the call that produced `result`.
    ///
    /// Usage, cost and timing are copied from `result` as-is. Calls are not
    /// streamed, so the first token is taken to arrive at the end time.
    pub fn for_call(
        name: impl Into<String>,
        model: impl Into<String>,
        prompt: PromptIdentity,
        input: Value,
        result: &GenerationResult,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            model_parameters: ModelParameters::fixed(),
            input,
            output: result.content().to_string(),
            prompt,
            usage_details: UsageDetails {
                input: result.input_tokens(),
                output: result.output_tokens(),
            },
            cost_details: CostDetails {
                input: result.input_cost(),
                output: result.output_cost(),
            },
            start_time: result.start_time(),
            completion_start_time: result.end_time(),
            end_time: result.end_time(),
        }
    }
}

/// A span together with the generations recorded under it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanNode {
    pub span: SpanRecord,
    pub generations: Vec<GenerationRecord>,
}

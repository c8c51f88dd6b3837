//! Generation result value object

use super::pricing;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};

/// Outcome of a single text-generation call (Value Object)
///
/// Costs are derived from the token counts at construction and cannot be
/// set independently. `end_time` is never earlier than `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    content: String,
    #[serde(rename = "inputToken")]
    input_tokens: u64,
    #[serde(rename = "outputToken")]
    output_tokens: u64,
    input_cost: f64,
    output_cost: f64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl GenerationResult {
    /// Creates a result from the raw call outcome, pricing the token counts.
    pub fn new(
        content: impl Into<String>,
        input_tokens: u64,
        output_tokens: u64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            content: content.into(),
            input_tokens,
            output_tokens,
            input_cost: pricing::input_cost(input_tokens),
            output_cost: pricing::output_cost(output_tokens),
            start_time,
            end_time: end_time.max(start_time),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    pub fn input_cost(&self) -> f64 {
        self.input_cost
    }

    pub fn output_cost(&self) -> f64 {
        self.output_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.input_cost + self.output_cost
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Wall-clock duration of the call
    pub fn latency(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }

    /// The same object the serializer writes, built without a fallible step
    pub fn to_json(&self) -> Value {
        json!({
            "content": self.content,
            "inputToken": self.input_tokens,
            "outputToken": self.output_tokens,
            "inputCost": self.input_cost,
            "outputCost": self.output_cost,
            "startTime": self.start_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            "endTime": self.end_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        })
    }
}

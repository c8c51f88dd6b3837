//! Usage-based cost for the Gemini 2.0 Flash family (batch API pricing).
//!
//! Rates are USD per million tokens.

/// Input rate, USD per million prompt tokens
pub const INPUT_RATE_PER_MILLION: f64 = 0.075;

/// Output rate, USD per million candidate tokens
pub const OUTPUT_RATE_PER_MILLION: f64 = 0.30;

const TOKENS_PER_UNIT: f64 = 1e6;

/// Cost of `tokens` prompt tokens
pub fn input_cost(tokens: u64) -> f64 {
    INPUT_RATE_PER_MILLION * tokens as f64 / TOKENS_PER_UNIT
}

/// Cost of `tokens` generated tokens
pub fn output_cost(tokens: u64) -> f64 {
    OUTPUT_RATE_PER_MILLION * tokens as f64 / TOKENS_PER_UNIT
}

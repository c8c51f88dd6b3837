//! Fixed generation policy.
//!
//! Every call goes out with the same temperature, output cap and safety
//! filter. These are not per-call parameters.

use serde::Serialize;

/// Sampling temperature for every call
pub const TEMPERATURE: f64 = 1.0;

/// Maximum generated tokens for every call
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Harm category a safety setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Block threshold for a harm category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
}

/// One safety filter entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// The safety filters applied to every call
    pub fn policy() -> Vec<SafetySetting> {
        vec![SafetySetting {
            category: HarmCategory::DangerousContent,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        }]
    }
}

/// Generation parameters as reported alongside each generation record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParameters {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl ModelParameters {
    pub fn fixed() -> Self {
        Self {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

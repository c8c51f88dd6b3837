//! Parsing evaluator verdicts

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

/// Fence tokens models wrap JSON answers in
static FENCE_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("json|text|`").expect("static pattern"));

/// Evaluator output that could not be turned into a score
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationParseError {
    #[error("malformed evaluator output: not valid JSON ({0})")]
    InvalidJson(String),

    #[error("malformed evaluator output: expected a JSON object")]
    NotAnObject,

    #[error("malformed evaluator output: missing field '{0}'")]
    MissingField(&'static str),

    #[error("malformed evaluator output: field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// `{value, comment}` as returned by an evaluator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreVerdict {
    pub value: f64,
    pub comment: String,
}

/// A verdict filed under an evaluator's name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationScore {
    pub name: String,
    pub value: f64,
    pub comment: String,
}

impl EvaluationScore {
    pub fn new(name: impl Into<String>, verdict: ScoreVerdict) -> Self {
        Self {
            name: name.into(),
            value: verdict.value,
            comment: verdict.comment,
        }
    }
}

/// Removes every literal `json`, `text` and backtick from raw model output.
pub fn strip_fences(raw: &str) -> String {
    FENCE_TOKENS.replace_all(raw, "").into_owned()
}

/// Parses raw evaluator output into a verdict.
///
/// The output is treated as untrusted: after fence stripping it must be a
/// JSON object with a numeric `value` and a string `comment`.
pub fn parse_evaluation_output(raw: &str) -> Result<ScoreVerdict, EvaluationParseError> {
    let cleaned = strip_fences(raw);
    let parsed: Value = serde_json::from_str(cleaned.trim())
        .map_err(|e| EvaluationParseError::InvalidJson(e.to_string()))?;

    let object = parsed.as_object().ok_or(EvaluationParseError::NotAnObject)?;

    let value = object
        .get("value")
        .ok_or(EvaluationParseError::MissingField("value"))?
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or(EvaluationParseError::WrongType {
            field: "value",
            expected: "number",
        })?;

    let comment = object
        .get("comment")
        .ok_or(EvaluationParseError::MissingField("comment"))?
        .as_str()
        .ok_or(EvaluationParseError::WrongType {
            field: "comment",
            expected: "string",
        })?
        .to_string();

    Ok(ScoreVerdict { value, comment })
}

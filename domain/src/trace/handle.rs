//! Handles to records already submitted to the collector

use serde::{Deserialize, Serialize};

/// Reference to a submitted trace
///
/// One per run. Scores and dataset links are attached through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceHandle {
    id: String,
}

impl TraceHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for TraceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Reference to a submitted span within a trace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanHandle {
    trace_id: String,
    id: String,
}

impl SpanHandle {
    pub fn new(trace: &TraceHandle, id: impl Into<String>) -> Self {
        Self {
            trace_id: trace.id().to_string(),
            id: id.into(),
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

//! Trace collector port
//!
//! Receives trace, span and generation records plus evaluation scores.

use advisor_domain::{
    EvaluationScore, GenerationRecord, SpanHandle, SpanRecord, TraceHandle, TraceRecord,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while submitting to the collector
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Collector request failed: {0}")]
    RequestFailed(String),

    #[error("Collector API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Observability collector
///
/// Implementations may buffer submissions; [`TraceCollector::flush`] must
/// deliver everything buffered so far before it returns. Events the
/// collector accepts the request for but rejects individually are the
/// implementation's to log.
#[async_trait]
pub trait TraceCollector: Send + Sync {
    /// Create a root trace
    async fn create_trace(&self, trace: TraceRecord) -> Result<TraceHandle, CollectorError>;

    /// Create a span under `trace`
    async fn create_span(
        &self,
        trace: &TraceHandle,
        span: SpanRecord,
    ) -> Result<SpanHandle, CollectorError>;

    /// Create a generation record under `span`
    async fn create_generation(
        &self,
        span: &SpanHandle,
        generation: GenerationRecord,
    ) -> Result<(), CollectorError>;

    /// Attach a score to `trace`
    async fn score(&self, trace: &TraceHandle, score: EvaluationScore)
    -> Result<(), CollectorError>;

    /// Deliver all buffered submissions
    async fn flush(&self) -> Result<(), CollectorError>;
}

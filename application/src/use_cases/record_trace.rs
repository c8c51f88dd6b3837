//! Trace recording
//!
//! Submits the trace tree of a completed advice run to the collector.

use crate::ports::trace_collector::{CollectorError, TraceCollector};
use advisor_domain::{AdviceOutcome, TraceHandle, TraceTree};
use std::sync::Arc;
use tracing::debug;

/// Records one trace per completed run
#[derive(Clone)]
pub struct TraceRecorder {
    collector: Arc<dyn TraceCollector>,
    trace_name: String,
}

impl TraceRecorder {
    pub fn new(collector: Arc<dyn TraceCollector>, trace_name: impl Into<String>) -> Self {
        Self {
            collector,
            trace_name: trace_name.into(),
        }
    }

    /// Build and submit the tree for `outcome`
    pub async fn record(&self, outcome: &AdviceOutcome) -> Result<TraceHandle, CollectorError> {
        self.submit(TraceTree::build(outcome, &self.trace_name))
            .await
    }

    /// Submit a tree top-down: trace, then each span followed by its
    /// generations, in tree order
    pub async fn submit(&self, tree: TraceTree) -> Result<TraceHandle, CollectorError> {
        let generation_count = tree.generation_count();
        let trace = self.collector.create_trace(tree.trace).await?;

        for node in tree.spans {
            let span = self.collector.create_span(&trace, node.span).await?;
            for generation in node.generations {
                self.collector.create_generation(&span, generation).await?;
            }
        }

        debug!(trace_id = %trace, generations = generation_count, "Recorded trace");
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{CollectorEvent, RecordingCollector};
    use advisor_domain::{SpanNode, SpanRecord, TraceRecord};
    use serde_json::Value;

    fn span(name: &str) -> SpanRecord {
        SpanRecord {
            name: name.to_string(),
            input: Value::Null,
            output: Value::Null,
        }
    }

    #[tokio::test]
    async fn test_submit_sends_trace_then_spans_in_order() {
        let collector = Arc::new(RecordingCollector::new());
        let recorder = TraceRecorder::new(collector.clone(), "t");

        let tree = TraceTree {
            trace: TraceRecord {
                name: "t".to_string(),
                input: Value::Null,
                output: Value::Null,
                tags: None,
            },
            spans: vec![
                SpanNode {
                    span: span("first"),
                    generations: vec![],
                },
                SpanNode {
                    span: span("second"),
                    generations: vec![],
                },
            ],
        };

        let handle = recorder.submit(tree).await.unwrap();

        let events = collector.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], CollectorEvent::Trace { id, .. } if id == handle.id()));
        let span_names: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                CollectorEvent::Span { trace_id, record } => {
                    assert_eq!(trace_id, handle.id());
                    Some(record.name.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(span_names, vec!["first", "second"]);
    }
}

//! Buffered trace collector over Langfuse batch ingestion
//!
//! Records are turned into ingestion events as they arrive and queued in
//! memory. A background loop ships them periodically; [`TraceCollector::flush`]
//! ships whatever is left and returns only once it has been delivered. A
//! batch that fails to send goes back to the head of the queue.

use super::client::{LangfuseClient, LangfuseError};
use super::types::{IngestionBatch, IngestionEvent, IngestionResponse};
use advisor_application::ports::trace_collector::{CollectorError, TraceCollector};
use advisor_domain::{
    EvaluationScore, GenerationRecord, SpanHandle, SpanRecord, TraceHandle, TraceRecord,
};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct LangfuseCollector {
    client: LangfuseClient,
    queue: Arc<Mutex<VecDeque<IngestionEvent>>>,
    /// Held for the whole of a flush so an explicit flush waits for a
    /// batch the background loop already took off the queue
    sending: Arc<Mutex<()>>,
    notify: Arc<Notify>,
    batch_size: usize,
}

impl LangfuseCollector {
    pub fn new(client: LangfuseClient, batch_size: usize) -> Self {
        Self {
            client,
            queue: Arc::new(Mutex::new(VecDeque::new())),
            sending: Arc::new(Mutex::new(())),
            notify: Arc::new(Notify::new()),
            batch_size: batch_size.max(1),
        }
    }

    /// Ship buffered events every `interval`, or as soon as a full batch
    /// is queued
    pub fn spawn_flush_loop(&self, interval: Duration) -> JoinHandle<()> {
        let collector = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = collector.notify.notified() => {}
                }
                if let Err(e) = collector.flush_queue().await {
                    warn!("Background flush failed: {}", e);
                }
            }
        })
    }

    pub async fn pending_len(&self) -> usize {
        self.queue.lock().await.len()
    }

    async fn enqueue(&self, kind: &'static str, body: Value) {
        let mut queue = self.queue.lock().await;
        queue.push_back(IngestionEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            body,
        });
        if queue.len() >= self.batch_size {
            self.notify.notify_one();
        }
    }

    async fn drain_batch(&self) -> Vec<IngestionEvent> {
        let mut queue = self.queue.lock().await;
        let take = queue.len().min(self.batch_size);
        queue.drain(..take).collect()
    }

    /// Puts an undelivered batch back at the head of the queue, ahead of
    /// anything enqueued while it was in flight
    async fn requeue(&self, batch: Vec<IngestionEvent>) {
        let mut queue = self.queue.lock().await;
        for event in batch.into_iter().rev() {
            queue.push_front(event);
        }
    }

    async fn flush_queue(&self) -> Result<(), LangfuseError> {
        let _sending = self.sending.lock().await;
        loop {
            let batch = self.drain_batch().await;
            if batch.is_empty() {
                return Ok(());
            }
            if let Err(e) = self.send_batch(&batch).await {
                self.requeue(batch).await;
                return Err(e);
            }
        }
    }

    async fn send_batch(&self, batch: &[IngestionEvent]) -> Result<(), LangfuseError> {
        let url = self.client.url(&["ingestion"])?;
        let response: IngestionResponse = self
            .client
            .post_json(url, &IngestionBatch { batch })
            .await?;

        for rejected in &response.errors {
            let kind = batch
                .iter()
                .find(|e| e.id == rejected.id)
                .map(|e| e.kind)
                .unwrap_or("unknown");
            warn!(
                event_id = %rejected.id,
                event_type = kind,
                status = rejected.status,
                "Collector rejected event: {}",
                rejected.message.as_deref().unwrap_or("no message")
            );
        }
        debug!(
            sent = batch.len(),
            accepted = response.successes.len(),
            rejected = response.errors.len(),
            "Ingestion batch delivered"
        );
        Ok(())
    }
}

impl From<LangfuseError> for CollectorError {
    fn from(e: LangfuseError) -> Self {
        match e {
            LangfuseError::Http { status, body } => CollectorError::Api {
                status: status.as_u16(),
                message: body,
            },
            other => CollectorError::RequestFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl TraceCollector for LangfuseCollector {
    async fn create_trace(&self, trace: TraceRecord) -> Result<TraceHandle, CollectorError> {
        let id = Uuid::new_v4().to_string();
        let mut body = json!({
            "id": id,
            "timestamp": Utc::now(),
            "name": trace.name,
            "input": trace.input,
            "output": trace.output,
        });
        if let Some(tags) = trace.tags {
            body["tags"] = json!(tags);
        }
        self.enqueue("trace-create", body).await;
        Ok(TraceHandle::new(id))
    }

    async fn create_span(
        &self,
        trace: &TraceHandle,
        span: SpanRecord,
    ) -> Result<SpanHandle, CollectorError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        self.enqueue(
            "span-create",
            json!({
                "id": id,
                "traceId": trace.id(),
                "name": span.name,
                "startTime": now,
                "endTime": now,
                "input": span.input,
                "output": span.output,
            }),
        )
        .await;
        Ok(SpanHandle::new(trace, id))
    }

    async fn create_generation(
        &self,
        span: &SpanHandle,
        generation: GenerationRecord,
    ) -> Result<(), CollectorError> {
        self.enqueue(
            "generation-create",
            json!({
                "id": Uuid::new_v4().to_string(),
                "traceId": span.trace_id(),
                "parentObservationId": span.id(),
                "name": generation.name,
                "model": generation.model,
                "modelParameters": generation.model_parameters,
                "input": generation.input,
                "output": generation.output,
                "promptName": generation.prompt.name,
                "promptVersion": generation.prompt.version,
                "usageDetails": generation.usage_details,
                "costDetails": generation.cost_details,
                "startTime": generation.start_time,
                "completionStartTime": generation.completion_start_time,
                "endTime": generation.end_time,
            }),
        )
        .await;
        Ok(())
    }

    async fn score(
        &self,
        trace: &TraceHandle,
        score: EvaluationScore,
    ) -> Result<(), CollectorError> {
        self.enqueue(
            "score-create",
            json!({
                "id": Uuid::new_v4().to_string(),
                "traceId": trace.id(),
                "name": score.name,
                "value": score.value,
                "comment": score.comment,
            }),
        )
        .await;
        Ok(())
    }

    async fn flush(&self) -> Result<(), CollectorError> {
        Ok(self.flush_queue().await?)
    }
}

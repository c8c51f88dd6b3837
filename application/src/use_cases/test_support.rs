//! Fake ports shared by the use case tests

use crate::ports::dataset_store::{DatasetStore, DatasetStoreError};
use crate::ports::generation::{GenerationClient, GenerationError};
use crate::ports::prompt_store::{PromptStore, PromptStoreError};
use crate::ports::trace_collector::{CollectorError, TraceCollector};
use advisor_domain::{
    ChatMessage, Dataset, DatasetItem, EvaluationScore, GenerationRecord, GenerationResult, Model,
    PromptKind, PromptTemplate, SpanHandle, SpanRecord, TraceHandle, TraceRecord,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ==================== Concurrency ====================

/// Counts calls currently inside a fake and the highest count seen
#[derive(Default)]
pub(crate) struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) -> InFlightGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlightGuard(self)
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

struct InFlightGuard<'a>(&'a InFlight);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

// ==================== Prompt store ====================

/// Serves `manager_N` as persona chat prompts, `summary_advices` as a
/// pipe-joined summary prompt, and anything else as a text evaluator prompt
/// that echoes its own name.
pub(crate) struct FakePromptStore {
    overrides: HashMap<String, PromptTemplate>,
    failing: HashSet<String>,
    latency: Option<Duration>,
    in_flight: InFlight,
}

impl FakePromptStore {
    pub(crate) fn standard() -> Self {
        Self {
            overrides: HashMap::new(),
            failing: HashSet::new(),
            latency: None,
            in_flight: InFlight::default(),
        }
    }

    /// Every fetch sleeps for `latency` before answering
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.in_flight.peak()
    }

    pub(crate) fn with_template(mut self, template: PromptTemplate) -> Self {
        self.overrides.insert(template.name.clone(), template);
        self
    }

    pub(crate) fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    fn default_template(name: &str) -> PromptTemplate {
        if let Some(n) = name.strip_prefix("manager_") {
            PromptTemplate::chat(
                name,
                1,
                vec![
                    ChatMessage::system(format!("persona {}", n)),
                    ChatMessage::user("{{user_input}}"),
                ],
            )
        } else if name == "summary_advices" {
            PromptTemplate::chat(
                name,
                3,
                vec![
                    ChatMessage::system("summarize"),
                    ChatMessage::user(
                        "{{user_input}}|{{advice_manager_first}}|{{advice_manager_second}}|\
                         {{advice_manager_third}}|{{advice_manager_fourth}}|{{advice_manager_fifth}}",
                    ),
                ],
            )
        } else {
            PromptTemplate::text(
                name,
                1,
                format!("{} :: {{{{user_input}}}} :: {{{{llm_output}}}}", name),
            )
        }
    }
}

#[async_trait]
impl PromptStore for FakePromptStore {
    async fn get_prompt(
        &self,
        name: &str,
        kind: PromptKind,
    ) -> Result<PromptTemplate, PromptStoreError> {
        let _in_flight = self.in_flight.enter();
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.contains(name) {
            return Err(PromptStoreError::NotFound(name.to_string()));
        }
        let template = self
            .overrides
            .get(name)
            .cloned()
            .unwrap_or_else(|| Self::default_template(name));
        if template.kind() != kind {
            return Err(PromptStoreError::TypeMismatch {
                name: name.to_string(),
                expected: kind,
                actual: template.kind(),
            });
        }
        Ok(template)
    }
}

// ==================== Generation ====================

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub system: String,
    pub user: String,
    pub model: Model,
}

/// Answers `persona N` with `AN`, `summarize` with `SUMMARY[<user>]`, and
/// evaluator calls (empty system) with the reply registered for the
/// evaluator prompt the user text starts with.
pub(crate) struct FakeGenerator {
    calls: Mutex<Vec<RecordedCall>>,
    failing_systems: HashSet<String>,
    evaluator_replies: HashMap<String, String>,
    reverse_finish: bool,
    in_flight: InFlight,
}

impl FakeGenerator {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing_systems: HashSet::new(),
            evaluator_replies: HashMap::new(),
            reverse_finish: false,
            in_flight: InFlight::default(),
        }
    }

    /// Advisor N takes (6 - N) * 10ms, so slot 5 finishes first
    pub(crate) fn reverse_finish() -> Self {
        Self {
            reverse_finish: true,
            ..Self::new()
        }
    }

    pub(crate) fn failing_system(mut self, system: &str) -> Self {
        self.failing_systems.insert(system.to_string());
        self
    }

    pub(crate) fn evaluator_reply(mut self, prompt: &str, reply: &str) -> Self {
        self.evaluator_replies
            .insert(prompt.to_string(), reply.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Most generate calls that were ever running at the same time
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.in_flight.peak()
    }

    pub(crate) fn advisor_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.system.starts_with("persona"))
            .collect()
    }

    pub(crate) fn summary_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.system == "summarize")
            .collect()
    }

    pub(crate) fn evaluator_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.system.is_empty())
            .collect()
    }

    fn reply(&self, system: &str, user: &str) -> String {
        if let Some(n) = system.strip_prefix("persona ") {
            format!("A{}", n)
        } else if system == "summarize" {
            format!("SUMMARY[{}]", user)
        } else {
            self.evaluator_replies
                .iter()
                .find(|(prompt, _)| user.starts_with(prompt.as_str()))
                .map(|(_, reply)| reply.clone())
                .unwrap_or_else(|| "```json\n{\"value\": 0.5, \"comment\": \"fine\"}\n```".to_string())
        }
    }
}

#[async_trait]
impl GenerationClient for FakeGenerator {
    async fn generate(
        &self,
        system_instruction: &str,
        user_text: &str,
        model: &Model,
    ) -> Result<GenerationResult, GenerationError> {
        let _in_flight = self.in_flight.enter();
        self.calls.lock().unwrap().push(RecordedCall {
            system: system_instruction.to_string(),
            user: user_text.to_string(),
            model: model.clone(),
        });

        if self.reverse_finish {
            if let Some(n) = system_instruction
                .strip_prefix("persona ")
                .and_then(|n| n.parse::<u64>().ok())
            {
                tokio::time::sleep(Duration::from_millis((6 - n) * 10)).await;
            }
        }

        if self.failing_systems.contains(system_instruction) {
            return Err(GenerationError::Api {
                status: 500,
                message: "internal".to_string(),
            });
        }

        let start = Utc::now();
        Ok(GenerationResult::new(
            self.reply(system_instruction, user_text),
            100,
            40,
            start,
            Utc::now(),
        ))
    }
}

// ==================== Collector ====================

#[derive(Debug, Clone)]
pub(crate) enum CollectorEvent {
    Trace { id: String, record: TraceRecord },
    Span { trace_id: String, record: SpanRecord },
    Generation { span_id: String, record: GenerationRecord },
    Score { trace_id: String, score: EvaluationScore },
    Flush,
}

pub(crate) struct RecordingCollector {
    events: Mutex<Vec<CollectorEvent>>,
    next_id: AtomicUsize,
    fail_scores: bool,
}

impl RecordingCollector {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            fail_scores: false,
        }
    }

    pub(crate) fn failing_scores() -> Self {
        Self {
            fail_scores: true,
            ..Self::new()
        }
    }

    pub(crate) fn events(&self) -> Vec<CollectorEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn traces(&self) -> Vec<TraceRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                CollectorEvent::Trace { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn generations(&self) -> Vec<GenerationRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                CollectorEvent::Generation { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn scores(&self) -> Vec<(String, EvaluationScore)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                CollectorEvent::Score { trace_id, score } => Some((trace_id, score)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn flush_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, CollectorEvent::Flush))
            .count()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn push(&self, event: CollectorEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl TraceCollector for RecordingCollector {
    async fn create_trace(&self, trace: TraceRecord) -> Result<TraceHandle, CollectorError> {
        let id = self.next_id("trace");
        self.push(CollectorEvent::Trace {
            id: id.clone(),
            record: trace,
        });
        Ok(TraceHandle::new(id))
    }

    async fn create_span(
        &self,
        trace: &TraceHandle,
        span: SpanRecord,
    ) -> Result<SpanHandle, CollectorError> {
        let id = self.next_id("span");
        self.push(CollectorEvent::Span {
            trace_id: trace.id().to_string(),
            record: span,
        });
        Ok(SpanHandle::new(trace, id))
    }

    async fn create_generation(
        &self,
        span: &SpanHandle,
        generation: GenerationRecord,
    ) -> Result<(), CollectorError> {
        self.push(CollectorEvent::Generation {
            span_id: span.id().to_string(),
            record: generation,
        });
        Ok(())
    }

    async fn score(
        &self,
        trace: &TraceHandle,
        score: EvaluationScore,
    ) -> Result<(), CollectorError> {
        if self.fail_scores {
            return Err(CollectorError::RequestFailed("score rejected".to_string()));
        }
        self.push(CollectorEvent::Score {
            trace_id: trace.id().to_string(),
            score,
        });
        Ok(())
    }

    async fn flush(&self) -> Result<(), CollectorError> {
        self.push(CollectorEvent::Flush);
        Ok(())
    }
}

// ==================== Dataset store ====================

pub(crate) struct FakeDatasetStore {
    dataset: Dataset,
    links: Mutex<Vec<(String, String, String)>>,
    failing_links: HashSet<String>,
}

impl FakeDatasetStore {
    pub(crate) fn new(name: &str, items: Vec<DatasetItem>) -> Self {
        Self {
            dataset: Dataset {
                name: name.to_string(),
                items,
            },
            links: Mutex::new(Vec::new()),
            failing_links: HashSet::new(),
        }
    }

    pub(crate) fn failing_link(mut self, item_id: &str) -> Self {
        self.failing_links.insert(item_id.to_string());
        self
    }

    /// `(item_id, trace_id, run_name)` per successful link
    pub(crate) fn links(&self) -> Vec<(String, String, String)> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatasetStore for FakeDatasetStore {
    async fn get_dataset(&self, name: &str) -> Result<Dataset, DatasetStoreError> {
        if name != self.dataset.name {
            return Err(DatasetStoreError::NotFound(name.to_string()));
        }
        Ok(self.dataset.clone())
    }

    async fn link_item(
        &self,
        item: &DatasetItem,
        trace: &TraceHandle,
        run_name: &str,
    ) -> Result<(), DatasetStoreError> {
        if self.failing_links.contains(&item.id) {
            return Err(DatasetStoreError::Api {
                status: 400,
                message: "bad link".to_string(),
            });
        }
        self.links.lock().unwrap().push((
            item.id.clone(),
            trace.id().to_string(),
            run_name.to_string(),
        ));
        Ok(())
    }
}

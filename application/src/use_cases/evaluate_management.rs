//! Evaluate Management use case
//!
//! Replays the advice engine over a labeled dataset, scores every summary
//! with model-based evaluators and links each run back to its item.

use crate::config::EvaluationConfig;
use crate::ports::dataset_store::{DatasetStore, DatasetStoreError};
use crate::ports::generation::{GenerationClient, GenerationError};
use crate::ports::progress::{ItemStatus, NoProgress, ProgressNotifier};
use crate::ports::prompt_store::{PromptStore, PromptStoreError};
use crate::ports::trace_collector::{CollectorError, TraceCollector};
use crate::use_cases::resolve_prompts::PromptResolver;
use crate::use_cases::run_management::{RunManagementInput, RunManagementUseCase};
use advisor_domain::advice::entities::USER_INPUT_PARAM;
use advisor_domain::evaluation::evaluator::LLM_OUTPUT_PARAM;
use advisor_domain::{
    DatasetItem, EvaluationParseError, EvaluationScore, Evaluator, ManagementRun, Model, Phase,
    PromptError, PromptKind, PromptParams, parse_evaluation_output,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end a batch
///
/// Everything below the dataset fetch and the final flush is absorbed and
/// counted in the [`EvaluationReport`].
#[derive(Error, Debug)]
pub enum EvaluateManagementError {
    #[error("Dataset fetch failed: {0}")]
    Dataset(#[from] DatasetStoreError),

    #[error("Final flush failed: {0}")]
    Flush(#[source] CollectorError),
}

/// Why a single evaluator produced no score
#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error(transparent)]
    Prompt(#[from] PromptStoreError),

    #[error(transparent)]
    Compile(#[from] PromptError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Parse(#[from] EvaluationParseError),

    #[error("Score submission failed: {0}")]
    Submit(#[from] CollectorError),
}

/// Input for the EvaluateManagement use case
#[derive(Debug, Clone, Default)]
pub struct EvaluateManagementInput {
    /// Dataset to replay; the configured one when absent
    pub dataset: Option<String>,
    /// Advisor and summary model override for every replayed run
    pub model: Option<Model>,
    /// Batch run name; derived from the configured prefix and the current
    /// time when absent
    pub run_name: Option<String>,
}

impl EvaluateManagementInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset: Option<String>) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_model(mut self, model: Option<Model>) -> Self {
        self.model = model;
        self
    }

    pub fn with_run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = Some(run_name.into());
        self
    }
}

/// One evaluator that produced no score for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatorFailure {
    pub item_id: String,
    pub evaluator: String,
    pub reason: String,
}

/// What a batch did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub dataset: String,
    pub run_name: String,
    /// Items returned by the dataset store
    pub items: usize,
    /// Items whose input was not text
    pub skipped: usize,
    /// Items whose advice run completed
    pub evaluated: usize,
    /// Items whose advice run failed
    pub failed: usize,
    pub linked: usize,
    pub link_failures: usize,
    pub scores_submitted: usize,
    pub evaluator_failures: Vec<EvaluatorFailure>,
}

/// Use case for dataset replay and scoring
pub struct EvaluateManagementUseCase {
    runner: Arc<RunManagementUseCase>,
    prompts: PromptResolver,
    generator: Arc<dyn GenerationClient>,
    collector: Arc<dyn TraceCollector>,
    datasets: Arc<dyn DatasetStore>,
    config: EvaluationConfig,
}

impl EvaluateManagementUseCase {
    pub fn new(
        runner: Arc<RunManagementUseCase>,
        prompt_store: Arc<dyn PromptStore>,
        generator: Arc<dyn GenerationClient>,
        collector: Arc<dyn TraceCollector>,
        datasets: Arc<dyn DatasetStore>,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            runner,
            prompts: PromptResolver::new(prompt_store),
            generator,
            collector,
            datasets,
            config,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: EvaluateManagementInput,
    ) -> Result<EvaluationReport, EvaluateManagementError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Items are replayed one at a time in store order; each item is fully
    /// scored and linked before the next starts. Buffered submissions are
    /// flushed once, after the last item.
    pub async fn execute_with_progress(
        &self,
        input: EvaluateManagementInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<EvaluationReport, EvaluateManagementError> {
        let dataset_name = input
            .dataset
            .unwrap_or_else(|| self.config.dataset.clone());
        let run_name = input
            .run_name
            .unwrap_or_else(|| batch_run_name(&self.config.run_name_prefix));

        let dataset = self.datasets.get_dataset(&dataset_name).await?;
        let total = dataset.items.len();

        info!(
            dataset = %dataset_name,
            run_name = %run_name,
            items = total,
            "Starting dataset evaluation"
        );

        let mut report = EvaluationReport {
            dataset: dataset_name,
            run_name,
            items: total,
            ..Default::default()
        };

        for (index, item) in dataset.items.iter().enumerate() {
            progress.on_item_start(index, total, &item.id);
            let status = self
                .evaluate_item(item, input.model.as_ref(), &mut report, progress)
                .await;
            progress.on_item_complete(&item.id, status);
        }

        self.collector
            .flush()
            .await
            .map_err(EvaluateManagementError::Flush)?;

        info!(
            evaluated = report.evaluated,
            skipped = report.skipped,
            failed = report.failed,
            scores = report.scores_submitted,
            evaluator_failures = report.evaluator_failures.len(),
            "Dataset evaluation complete"
        );

        Ok(report)
    }

    async fn evaluate_item(
        &self,
        item: &DatasetItem,
        model: Option<&Model>,
        report: &mut EvaluationReport,
        progress: &dyn ProgressNotifier,
    ) -> ItemStatus {
        let Some(text) = item.text_input() else {
            info!(item_id = %item.id, "Skipping item with non-text input");
            report.skipped += 1;
            return ItemStatus::Skipped;
        };

        let run_input = RunManagementInput::new(text)
            .with_model(model.cloned())
            .for_evaluation();

        let run = match self.runner.execute_with_progress(run_input, progress).await {
            Ok(run) => run,
            Err(e) => {
                warn!(item_id = %item.id, "Advice run failed: {}", e);
                report.failed += 1;
                return ItemStatus::Failed;
            }
        };
        report.evaluated += 1;

        progress.on_phase_start(&Phase::Evaluate, self.config.evaluators.len());
        for evaluator in &self.config.evaluators {
            match self.score(evaluator, &run).await {
                Ok(()) => {
                    report.scores_submitted += 1;
                    progress.on_task_complete(&Phase::Evaluate, &evaluator.name, true);
                }
                Err(e) => {
                    warn!(
                        item_id = %item.id,
                        evaluator = %evaluator.name,
                        "Evaluator failed: {}",
                        e
                    );
                    progress.on_task_complete(&Phase::Evaluate, &evaluator.name, false);
                    report.evaluator_failures.push(EvaluatorFailure {
                        item_id: item.id.clone(),
                        evaluator: evaluator.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        progress.on_phase_complete(&Phase::Evaluate);

        match self
            .datasets
            .link_item(item, run.trace(), &report.run_name)
            .await
        {
            Ok(()) => report.linked += 1,
            Err(e) => {
                warn!(item_id = %item.id, trace_id = %run.trace(), "Dataset link failed: {}", e);
                report.link_failures += 1;
            }
        }

        ItemStatus::Evaluated
    }

    /// Run one evaluator against a completed run and attach its score
    async fn score(&self, evaluator: &Evaluator, run: &ManagementRun) -> Result<(), EvaluatorError> {
        let template = self
            .prompts
            .resolve(&evaluator.prompt, PromptKind::Text)
            .await?;

        let params = PromptParams::new()
            .with(USER_INPUT_PARAM, run.input_text())
            .with(LLM_OUTPUT_PARAM, run.summary_text());
        let text = PromptResolver::compile_text(&template, &params)?;

        let raw = self
            .generator
            .generate("", &text, &self.config.evaluator_model)
            .await?;
        let verdict = parse_evaluation_output(raw.content())?;

        self.collector
            .score(run.trace(), EvaluationScore::new(&evaluator.name, verdict))
            .await?;
        Ok(())
    }
}

/// Run name shared by every item of one batch, unique per invocation
fn batch_run_name(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdvisorConfig;
    use crate::use_cases::test_support::{
        FakeDatasetStore, FakeGenerator, FakePromptStore, RecordingCollector,
    };
    use advisor_domain::PromptTemplate;
    use serde_json::json;

    const HELPFULNESS: &str = "evaluate_management_agent_helpfulness";
    const HALLUCINATION: &str = "evaluate_management_agent_hallucination";

    struct Harness {
        use_case: EvaluateManagementUseCase,
        generator: Arc<FakeGenerator>,
        collector: Arc<RecordingCollector>,
        datasets: Arc<FakeDatasetStore>,
    }

    fn harness(
        store: FakePromptStore,
        generator: FakeGenerator,
        collector: RecordingCollector,
        datasets: FakeDatasetStore,
    ) -> Harness {
        let store: Arc<FakePromptStore> = Arc::new(store);
        let generator = Arc::new(generator);
        let collector = Arc::new(collector);
        let datasets = Arc::new(datasets);

        let runner = Arc::new(RunManagementUseCase::new(
            store.clone(),
            generator.clone(),
            collector.clone(),
            AdvisorConfig::default(),
        ));
        let use_case = EvaluateManagementUseCase::new(
            runner,
            store,
            generator.clone(),
            collector.clone(),
            datasets.clone(),
            EvaluationConfig::default().with_evaluator_model(Model::Gemini25Flash),
        );

        Harness {
            use_case,
            generator,
            collector,
            datasets,
        }
    }

    fn two_items() -> FakeDatasetStore {
        FakeDatasetStore::new(
            "Management Agent",
            vec![
                DatasetItem::new("item-1", json!("how do I give feedback?")),
                DatasetItem::new("item-2", json!("how do I run a 1:1?")),
            ],
        )
    }

    #[tokio::test]
    async fn test_two_items_link_score_and_flush_once() {
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new(),
            RecordingCollector::new(),
            two_items(),
        );

        let report = h
            .use_case
            .execute(EvaluateManagementInput::new().with_run_name("batch-1"))
            .await
            .unwrap();

        assert_eq!(report.items, 2);
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.linked, 2);
        assert_eq!(report.scores_submitted, 4);
        assert!(report.evaluator_failures.is_empty());

        let links = h.datasets.links();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|(_, _, run)| run == "batch-1"));
        assert_eq!(links[0].0, "item-1");
        assert_eq!(links[1].0, "item-2");

        let scores = h.collector.scores();
        assert_eq!(scores.len(), 4);
        let names: Vec<_> = scores.iter().map(|(_, s)| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Helpfulness", "Hallucination", "Helpfulness", "Hallucination"]
        );
        assert_eq!(scores[0].1.value, 0.5);
        assert_eq!(scores[0].1.comment, "fine");

        // Scores attach to the trace of the run they judge
        assert_eq!(scores[0].0, links[0].1);
        assert_eq!(scores[2].0, links[1].1);
        assert_ne!(links[0].1, links[1].1);

        assert_eq!(h.collector.flush_count(), 1);
        assert!(matches!(
            h.collector.events().last(),
            Some(crate::use_cases::test_support::CollectorEvent::Flush)
        ));
    }

    #[tokio::test]
    async fn test_replayed_runs_are_tagged_and_evaluators_use_their_model() {
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new(),
            RecordingCollector::new(),
            two_items(),
        );

        h.use_case
            .execute(EvaluateManagementInput::new().with_model(Some(Model::Gemini25Pro)))
            .await
            .unwrap();

        assert!(h
            .collector
            .traces()
            .iter()
            .all(|t| t.tags == Some(vec!["evaluation".to_string()])));

        let evaluator_calls = h.generator.evaluator_calls();
        assert_eq!(evaluator_calls.len(), 4);
        assert!(evaluator_calls
            .iter()
            .all(|c| c.model == Model::Gemini25Flash && c.system.is_empty()));
        assert!(h
            .generator
            .advisor_calls()
            .iter()
            .all(|c| c.model == Model::Gemini25Pro));

        assert_eq!(
            evaluator_calls[0].user,
            format!(
                "{} :: how do I give feedback? :: SUMMARY[how do I give feedback?|A1|A2|A3|A4|A5]",
                HELPFULNESS
            )
        );
    }

    #[tokio::test]
    async fn test_one_failing_evaluator_does_not_drop_the_item() {
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new().evaluator_reply(HALLUCINATION, "I think it is fine"),
            RecordingCollector::new(),
            two_items(),
        );

        let report = h.use_case.execute(EvaluateManagementInput::new()).await.unwrap();

        assert_eq!(report.scores_submitted, 2);
        assert_eq!(report.linked, 2);
        assert_eq!(report.evaluator_failures.len(), 2);
        assert_eq!(report.evaluator_failures[0].evaluator, "Hallucination");
        assert_eq!(report.evaluator_failures[0].item_id, "item-1");
        assert!(report.evaluator_failures[0]
            .reason
            .contains("malformed evaluator output"));

        let names: Vec<_> = h
            .collector
            .scores()
            .into_iter()
            .map(|(_, s)| s.name)
            .collect();
        assert_eq!(names, vec!["Helpfulness", "Helpfulness"]);
        assert_eq!(h.collector.flush_count(), 1);
    }

    #[tokio::test]
    async fn test_evaluator_prompt_failures_are_absorbed() {
        let chat_evaluator = PromptTemplate::chat(HELPFULNESS, 1, vec![]);
        let h = harness(
            FakePromptStore::standard()
                .with_template(chat_evaluator)
                .failing(HALLUCINATION),
            FakeGenerator::new(),
            RecordingCollector::new(),
            two_items(),
        );

        let report = h.use_case.execute(EvaluateManagementInput::new()).await.unwrap();

        assert_eq!(report.evaluated, 2);
        assert_eq!(report.scores_submitted, 0);
        assert_eq!(report.evaluator_failures.len(), 4);
        assert_eq!(report.linked, 2);
        assert!(h.generator.evaluator_calls().is_empty());
    }

    #[tokio::test]
    async fn test_score_submission_failure_is_absorbed() {
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new(),
            RecordingCollector::failing_scores(),
            two_items(),
        );

        let report = h.use_case.execute(EvaluateManagementInput::new()).await.unwrap();

        assert_eq!(report.scores_submitted, 0);
        assert_eq!(report.evaluator_failures.len(), 4);
        assert_eq!(report.linked, 2);
    }

    #[tokio::test]
    async fn test_non_text_items_are_skipped() {
        let datasets = FakeDatasetStore::new(
            "Management Agent",
            vec![
                DatasetItem::new("item-1", json!({"question": "structured"})),
                DatasetItem::new("item-2", json!("how do I give feedback?")),
                DatasetItem::new("item-3", json!(42)),
            ],
        );
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new(),
            RecordingCollector::new(),
            datasets,
        );

        let report = h.use_case.execute(EvaluateManagementInput::new()).await.unwrap();

        assert_eq!(report.items, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.evaluated, 1);
        assert_eq!(report.scores_submitted, 2);
        assert_eq!(h.collector.traces().len(), 1);
        let linked: Vec<_> = h.datasets.links().into_iter().map(|l| l.0).collect();
        assert_eq!(linked, vec!["item-2"]);
    }

    #[tokio::test]
    async fn test_failed_run_continues_with_next_item() {
        let broken = PromptTemplate::chat(
            "summary_advices",
            1,
            vec![advisor_domain::ChatMessage::user("{{user_input}}")],
        );
        let h = harness(
            FakePromptStore::standard().with_template(broken),
            FakeGenerator::new(),
            RecordingCollector::new(),
            two_items(),
        );

        let report = h.use_case.execute(EvaluateManagementInput::new()).await.unwrap();

        assert_eq!(report.failed, 2);
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.linked, 0);
        assert!(h.datasets.links().is_empty());
        assert_eq!(h.collector.flush_count(), 1);
    }

    #[tokio::test]
    async fn test_link_failure_is_counted() {
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new(),
            RecordingCollector::new(),
            two_items().failing_link("item-1"),
        );

        let report = h.use_case.execute(EvaluateManagementInput::new()).await.unwrap();

        assert_eq!(report.linked, 1);
        assert_eq!(report.link_failures, 1);
        assert_eq!(report.scores_submitted, 4);
    }

    #[tokio::test]
    async fn test_unknown_dataset_fails_without_flush() {
        let h = harness(
            FakePromptStore::standard(),
            FakeGenerator::new(),
            RecordingCollector::new(),
            two_items(),
        );

        let err = h
            .use_case
            .execute(EvaluateManagementInput::new().with_dataset(Some("Other".to_string())))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EvaluateManagementError::Dataset(DatasetStoreError::NotFound(_))
        ));
        assert_eq!(h.collector.flush_count(), 0);
    }

    #[test]
    fn test_batch_run_name_uses_prefix() {
        let name = batch_run_name("management-agent");
        assert!(name.starts_with("management-agent-"));
        assert!(name.ends_with('Z'));
    }
}

//! Run Management use case
//!
//! Orchestrates one advice run: five advisors answer independently, a
//! summarizer folds their answers together, and the whole run is traced.

use crate::config::AdvisorConfig;
use crate::ports::generation::{GenerationClient, GenerationError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::prompt_store::{PromptStore, PromptStoreError};
use crate::ports::trace_collector::{CollectorError, TraceCollector};
use crate::use_cases::record_trace::TraceRecorder;
use crate::use_cases::resolve_prompts::PromptResolver;
use advisor_domain::advice::entities::USER_INPUT_PARAM;
use advisor_domain::{
    AdviceOutcome, AdviceRecord, Advices, AdvisorSlot, ChatPair, DomainError, ManagementRun,
    Model, Phase, PromptError, PromptIdentity, PromptKind, PromptParams, PromptTemplate,
    SummaryRecord,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during an advice run
#[derive(Error, Debug)]
pub enum RunManagementError {
    #[error("Prompt resolution failed: {0}")]
    PromptStore(#[from] PromptStoreError),

    #[error(transparent)]
    PromptConfig(#[from] PromptError),

    #[error("Advisor {slot} failed: {source}")]
    AdvisorFailed {
        slot: AdvisorSlot,
        #[source]
        source: GenerationError,
    },

    #[error("Summary generation failed: {0}")]
    SummaryFailed(#[source] GenerationError),

    #[error("Advisor task aborted: {0}")]
    TaskAborted(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Trace recording failed: {0}")]
    TraceFailed(#[from] CollectorError),
}

/// Input for the RunManagement use case
#[derive(Debug, Clone)]
pub struct RunManagementInput {
    /// The user's question
    pub input_text: String,
    /// Model override applied to every advisor and the summarizer
    pub model: Option<Model>,
    /// Whether the run is part of a dataset evaluation
    pub is_evaluation: bool,
}

impl RunManagementInput {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            model: None,
            is_evaluation: false,
        }
    }

    pub fn with_model(mut self, model: Option<Model>) -> Self {
        self.model = model;
        self
    }

    pub fn for_evaluation(mut self) -> Self {
        self.is_evaluation = true;
        self
    }
}

/// One advisor's compiled call, ready to send
struct AdvisorCall {
    slot: AdvisorSlot,
    prompt: PromptIdentity,
    messages: ChatPair,
}

/// Use case for running the five advisors and the summarizer
pub struct RunManagementUseCase {
    prompts: PromptResolver,
    generator: Arc<dyn GenerationClient>,
    recorder: TraceRecorder,
    config: AdvisorConfig,
}

impl RunManagementUseCase {
    pub fn new(
        prompt_store: Arc<dyn PromptStore>,
        generator: Arc<dyn GenerationClient>,
        collector: Arc<dyn TraceCollector>,
        config: AdvisorConfig,
    ) -> Self {
        Self {
            prompts: PromptResolver::new(prompt_store),
            generator,
            recorder: TraceRecorder::new(collector, config.trace_name.clone()),
            config,
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunManagementInput,
    ) -> Result<ManagementRun, RunManagementError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// All-or-nothing: if any template fails to resolve or compile, or any
    /// advisor call fails, no summary call is made and nothing is traced.
    pub async fn execute_with_progress(
        &self,
        input: RunManagementInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ManagementRun, RunManagementError> {
        let model = input
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());

        info!(model = %model, evaluation = input.is_evaluation, "Starting advice run");

        // Phase 1: Resolve all six templates, compile the advisor prompts
        let (advisor_templates, summary_template) = self.phase_resolve(progress).await?;
        let calls = Self::compile_advisors(&advisor_templates, &input.input_text)?;
        // Role structure does not depend on parameters
        PromptResolver::compile_chat(&summary_template, &PromptParams::new())?;

        // Phase 2: Advisors in parallel
        let advices = self.phase_advise(calls, &model, progress).await?;

        // Phase 3: Summary over all five advices
        let summary = self
            .phase_summarize(&summary_template, &advices, &input.input_text, &model, progress)
            .await?;

        let outcome = AdviceOutcome {
            input_text: input.input_text,
            model,
            is_evaluation: input.is_evaluation,
            advices,
            summary,
        };

        // Phase 4: Trace
        progress.on_phase_start(&Phase::Record, 1);
        let recorded = self.recorder.record(&outcome).await;
        progress.on_task_complete(&Phase::Record, &self.config.trace_name, recorded.is_ok());
        progress.on_phase_complete(&Phase::Record);
        let trace = recorded?;

        info!(trace_id = %trace, cost = outcome.total_cost(), "Advice run complete");
        Ok(ManagementRun::new(outcome, trace))
    }

    /// Phase 1: Fetch the advisor templates and the summary template
    /// concurrently
    async fn phase_resolve(
        &self,
        progress: &dyn ProgressNotifier,
    ) -> Result<(Vec<PromptTemplate>, PromptTemplate), RunManagementError> {
        progress.on_phase_start(&Phase::ResolvePrompts, AdvisorSlot::COUNT + 1);

        let resolved = futures::try_join!(
            self.prompts
                .resolve_all(&self.config.advisor_prompts, PromptKind::Chat),
            self.prompts
                .resolve(&self.config.summary_prompt, PromptKind::Chat),
        );

        let (advisors, summary) = match resolved {
            Ok(templates) => templates,
            Err(e) => {
                warn!("Prompt resolution failed: {}", e);
                progress.on_phase_complete(&Phase::ResolvePrompts);
                return Err(e.into());
            }
        };

        for template in advisors.iter().chain(std::iter::once(&summary)) {
            progress.on_task_complete(&Phase::ResolvePrompts, &template.name, true);
        }
        progress.on_phase_complete(&Phase::ResolvePrompts);

        Ok((advisors, summary))
    }

    /// Compile every advisor template with the user input before any call
    /// goes out
    fn compile_advisors(
        templates: &[PromptTemplate],
        input_text: &str,
    ) -> Result<Vec<AdvisorCall>, RunManagementError> {
        if templates.len() != AdvisorSlot::COUNT {
            return Err(DomainError::AdvisorCount {
                expected: AdvisorSlot::COUNT,
                found: templates.len(),
            }
            .into());
        }

        let params = PromptParams::new().with(USER_INPUT_PARAM, input_text);

        AdvisorSlot::ALL
            .iter()
            .zip(templates)
            .map(|(slot, template)| {
                let messages = PromptResolver::compile_chat(template, &params)?;
                Ok(AdvisorCall {
                    slot: *slot,
                    prompt: template.identity(),
                    messages,
                })
            })
            .collect()
    }

    /// Phase 2: Query all advisors in parallel
    ///
    /// Results are put back in slot order. The first failure ends the phase;
    /// dropping the join set aborts the advisors still running.
    async fn phase_advise(
        &self,
        calls: Vec<AdvisorCall>,
        model: &Model,
        progress: &dyn ProgressNotifier,
    ) -> Result<Advices, RunManagementError> {
        info!("Phase 2: Advisors");
        progress.on_phase_start(&Phase::Advise, calls.len());

        let mut join_set = JoinSet::new();

        for call in calls {
            let generator = Arc::clone(&self.generator);
            let model = model.clone();

            join_set.spawn(async move {
                let result = generator
                    .generate(&call.messages.system, &call.messages.user, &model)
                    .await;
                (call, result)
            });
        }

        let mut records = Vec::with_capacity(AdvisorSlot::COUNT);

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((call, Ok(output))) => {
                    debug!(advisor = %call.slot, tokens = output.output_tokens(), "Advisor responded");
                    progress.on_task_complete(&Phase::Advise, &call.slot.to_string(), true);
                    records.push(AdviceRecord {
                        slot: call.slot,
                        prompt: call.prompt,
                        messages: call.messages,
                        output,
                    });
                }
                Ok((call, Err(e))) => {
                    warn!(advisor = %call.slot, "Advisor failed: {}", e);
                    progress.on_task_complete(&Phase::Advise, &call.slot.to_string(), false);
                    progress.on_phase_complete(&Phase::Advise);
                    return Err(RunManagementError::AdvisorFailed {
                        slot: call.slot,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    progress.on_phase_complete(&Phase::Advise);
                    return Err(RunManagementError::TaskAborted(e.to_string()));
                }
            }
        }

        progress.on_phase_complete(&Phase::Advise);
        Ok(Advices::assemble(records)?)
    }

    /// Phase 3: Summarize all advices
    async fn phase_summarize(
        &self,
        template: &PromptTemplate,
        advices: &Advices,
        input_text: &str,
        model: &Model,
        progress: &dyn ProgressNotifier,
    ) -> Result<SummaryRecord, RunManagementError> {
        info!("Phase 3: Summary");
        progress.on_phase_start(&Phase::Summarize, 1);

        let params = advices.summary_params(input_text);
        let messages = match PromptResolver::compile_chat(template, &params) {
            Ok(messages) => messages,
            Err(e) => {
                progress.on_phase_complete(&Phase::Summarize);
                return Err(e.into());
            }
        };

        let result = self
            .generator
            .generate(&messages.system, &messages.user, model)
            .await;
        progress.on_task_complete(&Phase::Summarize, &template.name, result.is_ok());
        progress.on_phase_complete(&Phase::Summarize);

        let output = result.map_err(RunManagementError::SummaryFailed)?;

        Ok(SummaryRecord {
            prompt: template.identity(),
            messages,
            output,
        })
    }
}

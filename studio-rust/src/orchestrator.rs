use crate::{
    opentelemetry::{trace_section, BatchSpan},
    CopySettings, GeneratedContent, GenerationMarker, PromptBuilder, PromptMode, RewriteRequest,
    SectionCatalog, StudioError, StudioSession, Throttle, TokioThrottle,
};
use copy_sdk::{CopyModel, GenerationRequest};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tracing::{debug, error, info, warn};
use tracing_futures::Instrument;

/// Pause between two consecutive calls of a batch.
pub const DEFAULT_INTER_CALL_DELAY: Duration = Duration::from_millis(1500);

/// Drives generation calls for a session's sections, one at a time.
pub struct Orchestrator {
    model: Arc<dyn CopyModel>,
    catalog: Arc<SectionCatalog>,
    throttle: Arc<dyn Throttle>,
    inter_call_delay: Duration,
    rng: Mutex<StdRng>,
}

/// Outcome of one section in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Generated { section_id: String, word_count: usize },
    Failed { section_id: String, error: String },
}

impl SectionOutcome {
    #[must_use]
    pub fn section_id(&self) -> &str {
        match self {
            Self::Generated { section_id, .. } | Self::Failed { section_id, .. } => section_id,
        }
    }

    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

/// Per-section outcomes of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<SectionOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_generated())
            .map(SectionOutcome::section_id)
    }

    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_generated())
            .map(SectionOutcome::section_id)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(SectionOutcome::is_generated)
    }
}

struct GenerationTask {
    position: usize,
    section_id: String,
}

impl Orchestrator {
    #[must_use]
    pub fn new(params: OrchestratorParams) -> Self {
        let rng = params
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self {
            model: params.model,
            catalog: params.catalog,
            throttle: params.throttle,
            inter_call_delay: params.inter_call_delay,
            rng: Mutex::new(rng),
        }
    }

    pub fn builder(model: Arc<dyn CopyModel>) -> OrchestratorParams {
        OrchestratorParams::new(model)
    }

    #[must_use]
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    /// A fresh session over this orchestrator's catalog.
    #[must_use]
    pub fn new_session(&self) -> StudioSession {
        StudioSession::for_catalog(&self.catalog)
    }

    /// Generate every selected section, in selection order, replacing all
    /// previous results.
    ///
    /// Calls are strictly sequential with a pause before every call but the
    /// first. A failing section is recorded and skipped; the batch always
    /// runs to the end. Fails only when the session is already generating.
    pub async fn generate_all(&self, session: &StudioSession) -> Result<BatchReport, StudioError> {
        let guard = session.begin(GenerationMarker::Batch { current: None })?;

        let settings = session.settings().await;
        session.clear_results().await;

        let mut queue: VecDeque<GenerationTask> = settings
            .selected_sections
            .iter()
            .enumerate()
            .map(|(position, section_id)| GenerationTask {
                position,
                section_id: section_id.clone(),
            })
            .collect();

        let mut batch_span = BatchSpan::new(queue.len());
        info!(sections = queue.len(), model = %self.model.model_id(), "starting batch generation");

        let report = async {
            let mut report = BatchReport::default();

            while let Some(task) = queue.pop_front() {
                if task.position > 0 {
                    debug!(delay_secs = self.inter_call_delay.as_secs_f64(), "throttling");
                    self.throttle.pause(self.inter_call_delay).await;
                }

                guard.set_current(Some(&task.section_id));
                let outcome = self.run_task(session, &settings, &task).await;
                report.outcomes.push(outcome);
            }

            guard.set_current(None);
            report
        }
        .instrument(batch_span.span())
        .await;

        batch_span.on_report(&report);
        info!(
            generated = report.succeeded().count(),
            failed = report.failed().count(),
            "batch generation finished"
        );

        drop(guard);
        Ok(report)
    }

    /// Regenerate one section with extra instructions. On success the
    /// section's content is replaced; on failure it is left as it was and the
    /// error is returned. Rejected while the session is generating anything.
    pub async fn rewrite_section(
        &self,
        session: &StudioSession,
        section_id: &str,
        rewrite: &RewriteRequest,
    ) -> Result<GeneratedContent, StudioError> {
        if !self.catalog.contains(section_id) {
            return Err(StudioError::UnknownSection(section_id.to_string()));
        }

        let _guard = session.begin(GenerationMarker::Rewrite {
            section: section_id.to_string(),
        })?;

        let settings = session.settings().await;
        let result = trace_section(
            section_id,
            "rewrite",
            self.generate_section(&settings, section_id, PromptMode::Rewrite(rewrite)),
        )
        .await;

        match result {
            Ok(content) => {
                info!(section = section_id, words = content.word_count, "section rewritten");
                session.record_success(content.clone()).await;
                Ok(content)
            }
            Err(err) => {
                warn!(section = section_id, error = %err, "rewrite failed, keeping previous content");
                session.record_failure(section_id, &err).await;
                Err(err)
            }
        }
    }

    async fn run_task(
        &self,
        session: &StudioSession,
        settings: &CopySettings,
        task: &GenerationTask,
    ) -> SectionOutcome {
        let section_id = task.section_id.as_str();
        let result = trace_section(
            section_id,
            "generate",
            self.generate_section(settings, section_id, PromptMode::Generate),
        )
        .await;

        match result {
            Ok(content) => {
                let word_count = content.word_count;
                debug!(section = section_id, words = word_count, "section generated");
                session.record_success(content).await;
                SectionOutcome::Generated {
                    section_id: section_id.to_string(),
                    word_count,
                }
            }
            Err(err) => {
                error!(section = section_id, error = %err, "section generation failed");
                session.record_failure(section_id, &err).await;
                SectionOutcome::Failed {
                    section_id: section_id.to_string(),
                    error: err.to_string(),
                }
            }
        }
    }

    async fn generate_section(
        &self,
        settings: &CopySettings,
        section_id: &str,
        mode: PromptMode<'_>,
    ) -> Result<GeneratedContent, StudioError> {
        let prompt = self.build_prompt(settings, section_id, mode);
        if prompt.is_empty() {
            return Err(StudioError::UnknownSection(section_id.to_string()));
        }

        let request = GenerationRequest::new(prompt).with_credential(settings.credential.clone());
        let text = self.model.generate(request).await?;

        Ok(GeneratedContent::new(section_id, text))
    }

    fn build_prompt(&self, settings: &CopySettings, section_id: &str, mode: PromptMode<'_>) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        PromptBuilder::new(&self.catalog, settings).build(section_id, mode, &mut *rng)
    }
}

/// Parameters required to create a new orchestrator.
/// # Default Values
/// - `catalog`: `SectionCatalog::builtin()`
/// - `throttle`: `TokioThrottle`
/// - `inter_call_delay`: 1500 ms
/// - `seed`: `None` (entropy)
pub struct OrchestratorParams {
    /// The provider every section prompt is sent to.
    pub model: Arc<dyn CopyModel>,
    pub catalog: Arc<SectionCatalog>,
    /// How the pause between batch calls is performed.
    pub throttle: Arc<dyn Throttle>,
    pub inter_call_delay: Duration,
    /// Seed for optional keyword sampling. Fixed seeds give reproducible
    /// prompts.
    pub seed: Option<u64>,
}

impl OrchestratorParams {
    pub fn new(model: Arc<dyn CopyModel>) -> Self {
        Self {
            model,
            catalog: Arc::new(SectionCatalog::builtin()),
            throttle: Arc::new(TokioThrottle),
            inter_call_delay: DEFAULT_INTER_CALL_DELAY,
            seed: None,
        }
    }

    /// Set the section catalog
    #[must_use]
    pub fn catalog(mut self, catalog: SectionCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Set the throttle used between batch calls
    #[must_use]
    pub fn throttle(mut self, throttle: impl Throttle + 'static) -> Self {
        self.throttle = Arc::new(throttle);
        self
    }

    #[must_use]
    pub fn inter_call_delay(mut self, inter_call_delay: Duration) -> Self {
        self.inter_call_delay = inter_call_delay;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn build(self) -> Orchestrator {
        Orchestrator::new(self)
    }
}

//! Pipeline actions over a [`PlanStore`].
//!
//! Each action reads what it needs from the store, does at most one completion
//! call, and writes its result back only on success. A failed action leaves
//! every stage as it was.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::PlanError;
use crate::llm::{GenerationParams, LlmClient};
use crate::matcher::MatchOptions;
use crate::plan::{ConfigurationPlan, FinalPlan, UseCaseDraft};
use crate::prompts::PromptSet;
use crate::store::{PlanStore, Stage, StageValue};

/// Shown wherever generation is offered but no credential is configured.
pub const MISSING_CREDENTIAL_WARNING: &str =
    "GROQ_API_KEY が設定されていません。ドラフト生成は無効です。";

/// Runs the three planning stages against a shared catalog and prompt set.
pub struct Planner {
    llm: Option<Arc<dyn LlmClient>>,
    catalog: Arc<Catalog>,
    prompts: PromptSet,
    match_options: MatchOptions,
}

impl Planner {
    /// `llm` is `None` when no credential is configured; generation then fails
    /// with [`PlanError::MissingCredential`] without calling out.
    pub fn new(llm: Option<Arc<dyn LlmClient>>, catalog: Arc<Catalog>, prompts: PromptSet) -> Self {
        Self {
            llm,
            catalog,
            prompts,
            match_options: MatchOptions::default(),
        }
    }

    pub fn with_match_options(mut self, options: MatchOptions) -> Self {
        self.match_options = options;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.llm.is_some()
    }

    /// Model id, or `None` when generation is disabled.
    pub fn model(&self) -> Option<&str> {
        self.llm.as_deref().map(|l| l.model())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn match_options(&self) -> &MatchOptions {
        &self.match_options
    }

    fn client(&self) -> Result<&dyn LlmClient, PlanError> {
        self.llm.as_deref().ok_or(PlanError::MissingCredential)
    }

    /// Stage 1: drafts a use case from free text and stores it.
    #[instrument(name = "usecase_draft", skip_all)]
    pub async fn generate_draft(
        &self,
        store: &mut PlanStore,
        usecase_text: &str,
    ) -> Result<UseCaseDraft, PlanError> {
        let client = self.client()?;
        let messages = self.prompts.usecase_messages(usecase_text);
        let params = GenerationParams::usecase();
        debug!(
            model = client.model(),
            messages = messages.len(),
            temperature = params.temperature,
            "requesting use-case draft"
        );
        let response = client.invoke(&messages, &params).await?;
        let draft = UseCaseDraft::from_completion(&response.content).map_err(|e| {
            warn!(error = %e, "use-case draft extraction failed");
            e
        })?;
        store.set(Stage::UseCaseDraft, StageValue::UseCaseDraft(draft.clone()))?;
        info!(usecase = %draft.usecase_name, "use-case draft stored");
        Ok(draft)
    }

    /// Stage 2: confirms the stored draft into a [`FinalPlan`].
    ///
    /// Re-confirming rebuilds the plan from the current draft.
    #[instrument(name = "usecase_confirm", skip_all)]
    pub fn confirm_draft(&self, store: &mut PlanStore) -> Result<FinalPlan, PlanError> {
        let draft = store
            .draft()
            .ok_or(PlanError::MissingPrerequisite(Stage::UseCaseDraft))?;
        let plan = FinalPlan::confirm(draft, &self.catalog, &self.match_options);
        store.set(Stage::FinalPlan, StageValue::FinalPlan(plan.clone()))?;
        info!(
            usecase = %plan.usecase_name,
            recommended = plan.recommended_satellites.len(),
            "final plan confirmed"
        );
        Ok(plan)
    }

    /// Stage 3: drafts a configuration from the confirmed plan.
    #[instrument(name = "configuration_draft", skip_all)]
    pub async fn generate_configuration(
        &self,
        store: &mut PlanStore,
    ) -> Result<ConfigurationPlan, PlanError> {
        let client = self.client()?;
        let plan = store
            .final_plan()
            .ok_or(PlanError::MissingPrerequisite(Stage::FinalPlan))?;
        let messages = self.prompts.configuration_messages(plan, store.draft());
        let params = GenerationParams::configuration();
        debug!(
            model = client.model(),
            messages = messages.len(),
            temperature = params.temperature,
            "requesting configuration draft"
        );
        let response = client.invoke(&messages, &params).await?;
        let configuration = ConfigurationPlan::from_completion(&response.content).map_err(|e| {
            warn!(error = %e, "configuration extraction failed");
            e
        })?;
        store.set(
            Stage::ConfigurationDraft,
            StageValue::Configuration(configuration.clone()),
        )?;
        info!(
            sensors = configuration.stack.sensors.len(),
            candidates = configuration.stack.satellite_candidates.len(),
            "configuration draft stored"
        );
        Ok(configuration)
    }

    /// Copies the configuration draft to the confirmed stage.
    pub fn confirm_configuration(
        &self,
        store: &mut PlanStore,
    ) -> Result<ConfigurationPlan, PlanError> {
        let configuration = store
            .configuration_draft()
            .cloned()
            .ok_or(PlanError::MissingPrerequisite(Stage::ConfigurationDraft))?;
        store.set(
            Stage::ConfigurationConfirmed,
            StageValue::Configuration(configuration.clone()),
        )?;
        info!("configuration confirmed");
        Ok(configuration)
    }

    pub fn clear_draft(&self, store: &mut PlanStore) {
        store.clear(Stage::UseCaseDraft);
        info!("use-case draft cleared");
    }

    pub fn clear_final_plan(&self, store: &mut PlanStore) {
        store.clear(Stage::FinalPlan);
        info!("final plan cleared");
    }

    /// Clears both the draft and the confirmed configuration.
    pub fn clear_configuration(&self, store: &mut PlanStore) {
        store.clear(Stage::ConfigurationDraft);
        store.clear(Stage::ConfigurationConfirmed);
        info!("configuration cleared");
    }
}

//! Builds a [`Planner`] from settings: completion client, catalog and prompts.

use std::path::PathBuf;
use std::sync::Arc;

use config::Settings;
use skyplan::{Catalog, ChatGroq, LlmClient, Planner};

/// Overrides given on the command line; they win over the environment.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub catalog: Option<PathBuf>,
}

pub fn apply(mut settings: Settings, overrides: &Overrides) -> Settings {
    if let Some(m) = &overrides.model {
        settings.model = m.clone();
    }
    if let Some(c) = &overrides.catalog {
        settings.catalog_path = Some(c.clone());
    }
    settings
}

pub fn build_planner(settings: &Settings) -> Result<Planner, Box<dyn std::error::Error>> {
    let llm = settings.api_key.as_ref().map(|key| {
        Arc::new(ChatGroq::new(key.clone(), settings.base_url.clone(), settings.model.clone()))
            as Arc<dyn LlmClient>
    });
    let catalog = Catalog::load(settings.catalog_path.as_deref())?;
    let prompts = skyplan::prompts::load_or_default(settings.prompts_dir.as_deref())?;
    tracing::debug!(
        model = %settings.model,
        has_credential = llm.is_some(),
        catalog = catalog.len(),
        "planner ready"
    );
    Ok(Planner::new(llm, Arc::new(catalog), prompts))
}

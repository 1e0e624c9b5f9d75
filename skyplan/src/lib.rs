//! # SkyPlan
//!
//! Three-stage satellite observation planning: turn a free-text use case into a
//! structured draft, confirm it into a plan with catalog-matched satellites, then
//! draft a sensor/processing configuration for that plan.
//!
//! ## Stages
//!
//! 1. **Draft**: [`Planner::generate_draft`] sends the use case to an [`LlmClient`]
//!    and parses a [`UseCaseDraft`] out of the reply with [`extract_json_block`].
//! 2. **Confirm**: [`Planner::confirm_draft`] fills missing targets and ranks the
//!    [`Catalog`] with [`search`] into a [`FinalPlan`].
//! 3. **Configure**: [`Planner::generate_configuration`] drafts a [`ConfigurationPlan`]
//!    from the plan; [`Planner::confirm_configuration`] promotes it.
//!
//! Every stage reads and writes an explicit [`PlanStore`]; a failed action never
//! touches stored values.
//!
//! ## Main modules
//!
//! - [`extract`]: JSON-block extraction from noisy completion text.
//! - [`numeric`]: free-text resolution and revisit parsing.
//! - [`catalog`], [`matcher`]: satellite records and ranking.
//! - [`plan`]: stage data types.
//! - [`prompts`]: YAML templates and message building.
//! - [`llm`]: [`LlmClient`] trait, [`ChatGroq`], [`MockLlm`].
//! - [`store`], [`planner`]: state and pipeline actions.
//! - [`render`], [`artifact`]: markdown views and JSON downloads.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use skyplan::{Catalog, LlmClient, MockLlm, PlanStore, Planner};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::new(r#"{"usecase_name":"flood"}"#));
//! let planner = Planner::new(
//!     Some(llm),
//!     Arc::new(Catalog::embedded()?),
//!     skyplan::prompts::default_from_embedded()?,
//! );
//! let mut store = PlanStore::new();
//! planner.generate_draft(&mut store, "河川の氾濫域を把握したい").await?;
//! let plan = planner.confirm_draft(&mut store)?;
//! println!("{}", skyplan::render::final_plan_markdown(&plan));
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod llm;
pub mod matcher;
pub mod message;
pub mod numeric;
pub mod plan;
pub mod planner;
pub mod prompts;
pub mod render;
pub mod store;

pub use artifact::{Artifact, ArtifactKind};
pub use catalog::{Catalog, CatalogError, SatelliteRecord};
pub use error::PlanError;
pub use extract::{extract_json_block, parse_json_object};
pub use llm::{ChatGroq, GenerationParams, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use matcher::{search, search_scored, search_with, MatchOptions, ScoredCandidate};
pub use message::Message;
pub use numeric::{parse_avg_revisit_days, parse_min_resolution};
pub use plan::{ConfigurationPlan, FinalPlan, UseCaseDraft};
pub use planner::{Planner, MISSING_CREDENTIAL_WARNING};
pub use prompts::PromptSet;
pub use store::{PlanStore, Stage, StageValue};

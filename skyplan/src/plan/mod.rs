//! Plan objects produced by the three pipeline stages.
//!
//! - [`UseCaseDraft`]: stage 1, drafted by the model from free text.
//! - [`FinalPlan`]: stage 2, the confirmed draft plus matched satellites.
//! - [`ConfigurationPlan`]: stage 3, drafted by the model from the final plan.
//!
//! Model-produced types parse through [`UseCaseDraft::from_completion`] and
//! [`ConfigurationPlan::from_completion`], which either return a complete value
//! or an extraction error.

mod configuration;
mod draft;
mod final_plan;
mod lenient;

pub use configuration::{
    Complements, ConfigurationPlan, Processing, SatelliteCandidate, SensorSpec, Stack,
};
pub use draft::{Requirements, UseCaseDraft};
pub use final_plan::{
    FinalPlan, DEFAULT_RESOLUTION_M, DEFAULT_REVISIT_DAYS, MAX_PROPOSED_CONFIGURATION,
};

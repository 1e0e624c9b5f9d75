//! Stage 1 output: observation requirement drafted from a free-text use case.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlanError;
use crate::extract::parse_json_object;
use crate::plan::lenient;

/// Observation requirements inside a [`UseCaseDraft`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub bands: Vec<String>,
    #[serde(default, alias = "gsd_m", deserialize_with = "lenient::opt_number")]
    pub spatial_resolution_m_target: Option<f64>,
    #[serde(default, alias = "revisit_days", deserialize_with = "lenient::opt_number")]
    pub revisit_days_target: Option<f64>,
    /// Older replies nest `actions` here; moved up to [`UseCaseDraft::actions`] on parse.
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub actions: Vec<String>,
}

/// Draft observation requirement for one use case.
///
/// Every field may be missing in model output. Legacy names (`usecase`, `goal`,
/// `gsd_m`, `revisit_days`) are accepted on input; output always uses the
/// canonical names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UseCaseDraft {
    #[serde(default, alias = "usecase", deserialize_with = "lenient::text")]
    pub usecase_name: String,
    #[serde(default, alias = "goal", deserialize_with = "lenient::text")]
    pub objective: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub actions: Vec<String>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
}

impl UseCaseDraft {
    /// Parses a draft from raw completion text.
    ///
    /// Fails with [`PlanError::Extraction`] when no object is found, the object
    /// does not fit the schema, or it carries none of `usecase_name`,
    /// `objective` and `requirements`.
    pub fn from_completion(raw: &str) -> Result<Self, PlanError> {
        let map = parse_json_object(raw)?;
        let mut draft: UseCaseDraft = serde_json::from_value(Value::Object(map))
            .map_err(|e| PlanError::extraction(format!("draft does not fit schema: {}", e), raw))?;
        draft.normalize();
        if draft.is_empty() {
            return Err(PlanError::extraction("draft has no use-case fields", raw));
        }
        Ok(draft)
    }

    fn normalize(&mut self) {
        if let Some(req) = self.requirements.as_mut() {
            if self.actions.is_empty() {
                self.actions = std::mem::take(&mut req.actions);
            } else {
                req.actions.clear();
            }
        }
    }

    /// True when the draft carries nothing a later stage could use.
    pub fn is_empty(&self) -> bool {
        self.usecase_name.is_empty() && self.objective.is_empty() && self.requirements.is_none()
    }

    pub fn bands(&self) -> &[String] {
        self.requirements
            .as_ref()
            .map(|r| r.bands.as_slice())
            .unwrap_or(&[])
    }

    pub fn resolution_target_m(&self) -> Option<f64> {
        self.requirements
            .as_ref()
            .and_then(|r| r.spatial_resolution_m_target)
    }

    pub fn revisit_target_days(&self) -> Option<f64> {
        self.requirements.as_ref().and_then(|r| r.revisit_days_target)
    }
}

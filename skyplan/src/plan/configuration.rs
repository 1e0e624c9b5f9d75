//! Stage 3 output: sensor stack, processing and delivery plan.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlanError;
use crate::extract::parse_json_object;
use crate::plan::lenient;

/// One sensor in the proposed stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    /// `optical`, `sar`, `thermal` or `other`.
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub sensor_type: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub bands: String,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub gsd_target_m: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub revisit_target_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub usage: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SatelliteCandidate {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub why: String,
}

/// How gaps in the primary stack are covered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complements {
    #[serde(default, deserialize_with = "lenient::text")]
    pub cloud_mitigation: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub alternative_layers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub data_sources: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub sensors: Vec<SensorSpec>,
    #[serde(default)]
    pub satellite_candidates: Vec<SatelliteCandidate>,
    #[serde(default)]
    pub complements: Complements,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Processing {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub preprocess: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub fusion: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub qa: String,
}

/// Configuration plan drafted from a confirmed [`FinalPlan`](crate::plan::FinalPlan).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationPlan {
    #[serde(default)]
    pub stack: Stack,
    #[serde(default)]
    pub processing: Processing,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub deliverables: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub risks: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub next_actions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub assumptions: Vec<String>,
}

impl ConfigurationPlan {
    /// Parses a configuration plan from raw completion text.
    ///
    /// A plan with neither sensors nor satellite candidates is rejected as an
    /// extraction failure.
    pub fn from_completion(raw: &str) -> Result<Self, PlanError> {
        let map = parse_json_object(raw)?;
        let plan: ConfigurationPlan = serde_json::from_value(Value::Object(map)).map_err(|e| {
            PlanError::extraction(format!("configuration does not fit schema: {}", e), raw)
        })?;
        if plan.stack.sensors.is_empty() && plan.stack.satellite_candidates.is_empty() {
            return Err(PlanError::extraction(
                "configuration has no sensors or satellite candidates",
                raw,
            ));
        }
        Ok(plan)
    }
}

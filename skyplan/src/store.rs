//! Plan state store: at most one value per stage, for one session.
//!
//! Stages are an enum rather than string keys. Each [`PlanStore::set`]
//! overwrites; there is no history. Handlers receive the store by reference, so
//! it can be tested without any rendering layer.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::plan::{ConfigurationPlan, FinalPlan, UseCaseDraft};

/// Stage key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    UseCaseDraft,
    FinalPlan,
    ConfigurationDraft,
    ConfigurationConfirmed,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::UseCaseDraft,
        Stage::FinalPlan,
        Stage::ConfigurationDraft,
        Stage::ConfigurationConfirmed,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::UseCaseDraft => "use-case draft",
            Stage::FinalPlan => "final plan",
            Stage::ConfigurationDraft => "configuration draft",
            Stage::ConfigurationConfirmed => "confirmed configuration",
        };
        f.write_str(s)
    }
}

/// A value held under a stage key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StageValue {
    UseCaseDraft(UseCaseDraft),
    FinalPlan(FinalPlan),
    Configuration(ConfigurationPlan),
}

impl StageValue {
    fn kind(&self) -> &'static str {
        match self {
            StageValue::UseCaseDraft(_) => "use-case draft",
            StageValue::FinalPlan(_) => "final plan",
            StageValue::Configuration(_) => "configuration plan",
        }
    }

    fn fits(&self, stage: Stage) -> bool {
        matches!(
            (self, stage),
            (StageValue::UseCaseDraft(_), Stage::UseCaseDraft)
                | (StageValue::FinalPlan(_), Stage::FinalPlan)
                | (StageValue::Configuration(_), Stage::ConfigurationDraft)
                | (StageValue::Configuration(_), Stage::ConfigurationConfirmed)
        )
    }
}

/// Stored value with its write time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoredValue {
    pub value: StageValue,
    pub updated_at: DateTime<Utc>,
}

/// Per-session plan state.
#[derive(Clone, Debug, Default)]
pub struct PlanStore {
    entries: HashMap<Stage, StoredValue>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `stage`, replacing whatever was there.
    ///
    /// Rejects a value whose kind does not belong to `stage`.
    pub fn set(&mut self, stage: Stage, value: StageValue) -> Result<(), PlanError> {
        if !value.fits(stage) {
            return Err(PlanError::StageMismatch {
                stage,
                found: value.kind(),
            });
        }
        self.entries.insert(
            stage,
            StoredValue {
                value,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    pub fn get(&self, stage: Stage) -> Option<&StageValue> {
        self.entries.get(&stage).map(|e| &e.value)
    }

    pub fn entry(&self, stage: Stage) -> Option<&StoredValue> {
        self.entries.get(&stage)
    }

    /// Removes the value under `stage`; other stages are untouched.
    pub fn clear(&mut self, stage: Stage) {
        self.entries.remove(&stage);
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.entries.contains_key(&stage)
    }

    pub fn draft(&self) -> Option<&UseCaseDraft> {
        match self.get(Stage::UseCaseDraft) {
            Some(StageValue::UseCaseDraft(d)) => Some(d),
            _ => None,
        }
    }

    pub fn final_plan(&self) -> Option<&FinalPlan> {
        match self.get(Stage::FinalPlan) {
            Some(StageValue::FinalPlan(p)) => Some(p),
            _ => None,
        }
    }

    fn configuration_at(&self, stage: Stage) -> Option<&ConfigurationPlan> {
        match self.get(stage) {
            Some(StageValue::Configuration(c)) => Some(c),
            _ => None,
        }
    }

    pub fn configuration_draft(&self) -> Option<&ConfigurationPlan> {
        self.configuration_at(Stage::ConfigurationDraft)
    }

    pub fn configuration_confirmed(&self) -> Option<&ConfigurationPlan> {
        self.configuration_at(Stage::ConfigurationConfirmed)
    }

    /// Configuration to show: the confirmed one when present, else the draft.
    pub fn configuration(&self) -> Option<(Stage, &ConfigurationPlan)> {
        self.configuration_confirmed()
            .map(|c| (Stage::ConfigurationConfirmed, c))
            .or_else(|| {
                self.configuration_draft()
                    .map(|c| (Stage::ConfigurationDraft, c))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> StageValue {
        StageValue::UseCaseDraft(UseCaseDraft {
            usecase_name: name.to_string(),
            ..Default::default()
        })
    }

    fn configuration(sensor: &str) -> StageValue {
        let mut plan = ConfigurationPlan::default();
        plan.stack.satellite_candidates.push(crate::plan::SatelliteCandidate {
            name: sensor.to_string(),
            why: String::new(),
        });
        StageValue::Configuration(plan)
    }

    #[test]
    fn set_get_overwrites() {
        let mut store = PlanStore::new();
        assert!(store.get(Stage::UseCaseDraft).is_none());
        store.set(Stage::UseCaseDraft, draft("a")).unwrap();
        store.set(Stage::UseCaseDraft, draft("b")).unwrap();
        assert_eq!(store.draft().unwrap().usecase_name, "b");
    }

    #[test]
    fn clear_removes_only_that_stage() {
        let mut store = PlanStore::new();
        store.set(Stage::UseCaseDraft, draft("a")).unwrap();
        store
            .set(Stage::ConfigurationDraft, configuration("s1"))
            .unwrap();
        store.clear(Stage::UseCaseDraft);
        assert!(store.get(Stage::UseCaseDraft).is_none());
        assert!(store.get(Stage::ConfigurationDraft).is_some());
    }

    #[test]
    fn mismatched_kind_is_rejected_and_state_unchanged() {
        let mut store = PlanStore::new();
        let err = store.set(Stage::FinalPlan, draft("a")).unwrap_err();
        assert!(matches!(err, PlanError::StageMismatch { stage: Stage::FinalPlan, .. }));
        assert!(!store.contains(Stage::FinalPlan));
    }

    #[test]
    fn confirmed_configuration_is_preferred_over_draft() {
        let mut store = PlanStore::new();
        store
            .set(Stage::ConfigurationDraft, configuration("draft"))
            .unwrap();
        let (stage, _) = store.configuration().unwrap();
        assert_eq!(stage, Stage::ConfigurationDraft);

        store
            .set(Stage::ConfigurationConfirmed, configuration("confirmed"))
            .unwrap();
        let (stage, plan) = store.configuration().unwrap();
        assert_eq!(stage, Stage::ConfigurationConfirmed);
        assert_eq!(plan.stack.satellite_candidates[0].name, "confirmed");
    }

    #[test]
    fn stage_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Stage::ConfigurationConfirmed).unwrap(),
            "configuration_confirmed"
        );
        assert_eq!(Stage::ALL.len(), 4);
    }
}

//! Stage 2 output: the confirmed plan with catalog-matched satellites.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SatelliteRecord};
use crate::matcher::{search_with, MatchOptions};
use crate::plan::UseCaseDraft;

/// Resolution assumed when the draft leaves it open (field-level monitoring).
pub const DEFAULT_RESOLUTION_M: f64 = 10.0;

/// Revisit assumed when the draft leaves it open.
pub const DEFAULT_REVISIT_DAYS: f64 = 3.0;

/// Number of recommendations turned into configuration labels.
pub const MAX_PROPOSED_CONFIGURATION: usize = 3;

/// Confirmed observation plan. Rebuilt wholesale on every confirmation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalPlan {
    pub usecase_name: String,
    pub observation_objective: String,
    pub observation_bands: Vec<String>,
    pub spatial_resolution_target_m: f64,
    pub revisit_target_days: f64,
    pub recommended_satellites: Vec<SatelliteRecord>,
    /// `"mission/instrument"` labels of the top recommendations.
    pub proposed_configuration: Vec<String>,
    pub supplemental_note: String,
}

impl FinalPlan {
    /// Confirms `draft`: fills missing targets with defaults and shortlists
    /// satellites from `catalog`.
    pub fn confirm(draft: &UseCaseDraft, catalog: &Catalog, options: &MatchOptions) -> Self {
        let resolution = draft.resolution_target_m();
        let revisit = draft.revisit_target_days();
        let spatial_resolution_target_m = resolution.unwrap_or(DEFAULT_RESOLUTION_M);
        let revisit_target_days = revisit.unwrap_or(DEFAULT_REVISIT_DAYS);
        let observation_bands = draft.bands().to_vec();

        let recommended_satellites = search_with(
            observation_bands.as_slice(),
            spatial_resolution_target_m,
            revisit_target_days,
            catalog.records(),
            options,
        );
        let proposed_configuration = recommended_satellites
            .iter()
            .take(MAX_PROPOSED_CONFIGURATION)
            .map(SatelliteRecord::label)
            .collect();

        let mut notes = Vec::new();
        if recommended_satellites.is_empty() {
            notes.push(
                "条件（バンド・解像度・観測頻度）に合致する衛星が見つかりませんでした。目標値を緩めるか、バンド指定を見直してください。"
                    .to_string(),
            );
        } else {
            notes.push(format!(
                "解像度・観測頻度は目標値の{}倍までを許容して候補を抽出し、目標との差が小さい順に並べています。",
                options.tolerance
            ));
        }
        if resolution.is_none() {
            notes.push(format!(
                "目標解像度が未指定のため {} m を仮定しました。",
                DEFAULT_RESOLUTION_M
            ));
        }
        if revisit.is_none() {
            notes.push(format!(
                "目標観測頻度が未指定のため {} 日を仮定しました。",
                DEFAULT_REVISIT_DAYS
            ));
        }

        Self {
            usecase_name: draft.usecase_name.clone(),
            observation_objective: draft.objective.clone(),
            observation_bands,
            spatial_resolution_target_m,
            revisit_target_days,
            recommended_satellites,
            proposed_configuration,
            supplemental_note: notes.join(""),
        }
    }
}

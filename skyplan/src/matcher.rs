//! Satellite matcher: filter catalog records against target band, resolution and
//! revisit, then rank by distance to the targets.
//!
//! A record passes when every requested band appears (case-insensitively) in its
//! spectral-band text and both parsed numbers are within `tolerance ×` target.
//! Survivors are ranked by `|res − target_res| + |rev − target_rev|`, closest
//! first; ties keep catalog order.

use serde::Serialize;

use crate::catalog::SatelliteRecord;
use crate::numeric::{parse_avg_revisit_days, parse_min_resolution};

/// Default multiplier on the targets, wide enough that stringent targets still
/// return something.
pub const DEFAULT_TOLERANCE: f64 = 1.5;

/// Default number of candidates kept.
pub const DEFAULT_LIMIT: usize = 5;

/// Filtering and truncation knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchOptions {
    pub tolerance: f64,
    pub limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A record that passed the filter, with the numbers it was ranked on.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredCandidate {
    pub record: SatelliteRecord,
    pub resolution_m: f64,
    pub revisit_days: f64,
    pub distance: f64,
}

fn has_all_bands<S: AsRef<str>>(record: &SatelliteRecord, bands: &[S]) -> bool {
    let haystack = record.spectral_band.to_lowercase();
    bands
        .iter()
        .all(|b| haystack.contains(&b.as_ref().trim().to_lowercase()))
}

/// Filters and ranks `catalog`, returning scores alongside each record.
pub fn search_scored<S: AsRef<str>>(
    target_bands: &[S],
    target_resolution_m: f64,
    target_revisit_days: f64,
    catalog: &[SatelliteRecord],
    options: &MatchOptions,
) -> Vec<ScoredCandidate> {
    let max_resolution = target_resolution_m * options.tolerance;
    let max_revisit = target_revisit_days * options.tolerance;

    let mut candidates: Vec<ScoredCandidate> = catalog
        .iter()
        .filter(|r| has_all_bands(r, target_bands))
        .filter_map(|r| {
            let resolution_m = parse_min_resolution(&r.spatial_resolution_m);
            let revisit_days = parse_avg_revisit_days(&r.revisit);
            if resolution_m > max_resolution || revisit_days > max_revisit {
                return None;
            }
            let distance = (resolution_m - target_resolution_m).abs()
                + (revisit_days - target_revisit_days).abs();
            Some(ScoredCandidate {
                record: r.clone(),
                resolution_m,
                revisit_days,
                distance,
            })
        })
        .collect();

    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(options.limit);
    candidates
}

/// [`search_scored`] without the scores.
pub fn search_with<S: AsRef<str>>(
    target_bands: &[S],
    target_resolution_m: f64,
    target_revisit_days: f64,
    catalog: &[SatelliteRecord],
    options: &MatchOptions,
) -> Vec<SatelliteRecord> {
    search_scored(
        target_bands,
        target_resolution_m,
        target_revisit_days,
        catalog,
        options,
    )
    .into_iter()
    .map(|c| c.record)
    .collect()
}

/// Up to five records closest to the targets, using the default 1.5× tolerance.
pub fn search<S: AsRef<str>>(
    target_bands: &[S],
    target_resolution_m: f64,
    target_revisit_days: f64,
    catalog: &[SatelliteRecord],
) -> Vec<SatelliteRecord> {
    search_with(
        target_bands,
        target_resolution_m,
        target_revisit_days,
        catalog,
        &MatchOptions::default(),
    )
}

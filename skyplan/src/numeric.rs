//! Representative numbers from free-text resolution and revisit fields.
//!
//! Catalog entries describe resolution as `"0.31/1.24/3.7"` or `"約 3"` and
//! revisit as `"6–12 日"` or `"< 1 日"`. Both parsers are total: when no number
//! can be recovered they return [`UNPARSEABLE`], which sorts last and fails any
//! tolerance check.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for "no number found".
pub const UNPARSEABLE: f64 = 9999.0;

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("decimal regex must compile"));

static PURE_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("pure decimal regex must compile"));

const DASHES: &[char] = &['–', '—', '−', '‐', '〜', '～', '~'];

/// Revisit unit words and comparison markers removed before tokenizing.
/// Longer forms come first so `days` is not left as `s`.
const REVISIT_NOISE: &[&str] = &[
    "<=", "days", "day", "日", "以内", "以下", "未満", "程度", "約", "<", "＜", "≤", "≦",
];

const REVISIT_SEPARATORS: &[char] = &[
    '/', '／', '-', ' ', '　', ',', '、', '(', ')', '（', '）',
];

fn normalize_dashes(text: &str) -> String {
    text.chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect()
}

/// First decimal number in `text`, if any.
pub fn first_number(text: &str) -> Option<f64> {
    let normalized = normalize_dashes(text).replace('約', " ");
    DECIMAL
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Finest resolution in a slash list or range: the first decimal number found.
///
/// `"0.31/1.24/3.7"` → 0.31, `"約 3"` → 3.0, `""` → [`UNPARSEABLE`].
pub fn parse_min_resolution(text: &str) -> f64 {
    first_number(text).unwrap_or(UNPARSEABLE)
}

/// Mean of the plain numbers in a revisit description.
///
/// `"6–12 日"` → 9.0, `"< 1 日"` → 1.0, `""` → [`UNPARSEABLE`]. Ranges and
/// lists are averaged so constellation figures like `"1-2"` land in between.
pub fn parse_avg_revisit_days(text: &str) -> f64 {
    let mut cleaned = normalize_dashes(&text.to_lowercase());
    for noise in REVISIT_NOISE {
        cleaned = cleaned.replace(noise, " ");
    }
    let values: Vec<f64> = cleaned
        .split(REVISIT_SEPARATORS)
        .filter(|t| PURE_DECIMAL.is_match(t))
        .filter_map(|t| t.parse::<f64>().ok())
        .collect();
    if values.is_empty() {
        return UNPARSEABLE;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

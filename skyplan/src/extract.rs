//! Pull a single JSON object out of noisy model output.
//!
//! Models usually answer with a short prose summary followed by a JSON object,
//! sometimes inside a ```` ```json ```` fence. [`extract_json_block`] finds that
//! object; [`parse_json_object`] also parses it and reports failures together
//! with the raw text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::PlanError;

/// Returned by [`extract_json_block`] when the text holds no object.
pub const EMPTY_OBJECT: &str = "{}";

static FENCED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced JSON regex must compile")
});

/// Returns the first JSON object in `text`, or `"{}"` when there is none.
///
/// A fenced block wins over bare braces. Outside a fence the first `{` is
/// matched to its closing `}` by depth counting, so nested objects come back
/// whole. Never fails: an unmatched or missing brace yields `"{}"`.
pub fn extract_json_block(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_OBJECT.to_string();
    }

    if let Some(inner) = FENCED_OBJECT.captures(text).and_then(|c| c.get(1)) {
        return inner.as_str().trim().to_string();
    }

    let Some(start) = text.find('{') else {
        return EMPTY_OBJECT.to_string();
    };
    let mut depth: usize = 0;
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return text[start..end].trim().to_string();
                }
            }
            _ => {}
        }
    }
    EMPTY_OBJECT.to_string()
}

/// Extracts and strictly parses the JSON object in `raw`.
///
/// An empty extraction and a parse failure are both [`PlanError::Extraction`];
/// the error keeps `raw` so the caller can show what the model actually said.
pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>, PlanError> {
    let block = extract_json_block(raw);
    if block == EMPTY_OBJECT {
        return Err(PlanError::extraction("no JSON object found", raw));
    }
    match serde_json::from_str::<Value>(&block) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(PlanError::extraction("JSON is not an object", raw)),
        Err(e) => Err(PlanError::extraction(format!("invalid JSON: {}", e), raw)),
    }
}

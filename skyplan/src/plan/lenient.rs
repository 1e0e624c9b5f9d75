//! Forgiving field deserializers for model-produced JSON.
//!
//! The model is asked for numbers and lists but sometimes returns `"10"`,
//! `"可視・近赤外"` or `null`. These helpers accept the common shapes and fall
//! back to an empty value instead of failing the whole object.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::numeric::first_number;

/// Separators used when a list arrives as one string.
const LIST_SEPARATORS: &[char] = &['・', '、', ',', '，', '/', '／', '\n'];

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String, number, or list (joined with `・`); anything else is empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("・"),
        other => value_to_text(&other).unwrap_or_default(),
    })
}

/// List of strings, or one string split on `・`, `、`, `,`, `/` and newlines.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => s
            .split(LIST_SEPARATORS)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Number(n) => vec![n.to_string()],
        _ => Vec::new(),
    })
}

/// Number, or the first number inside a string; otherwise `None`.
pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => first_number(&s),
        _ => None,
    })
}

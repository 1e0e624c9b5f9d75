//! Downloadable plan artifacts: indented UTF-8 JSON named after the use case.

use serde::Serialize;

use crate::error::PlanError;

/// Which stage an artifact holds; decides the filename suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Draft,
    Plan,
    Configuration,
}

impl ArtifactKind {
    fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Draft => "draft",
            ArtifactKind::Plan => "final_plan",
            ArtifactKind::Configuration => "configuration",
        }
    }

    /// Parses the path segment used by the download endpoint.
    pub fn from_segment(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ArtifactKind::Draft),
            "plan" => Some(ArtifactKind::Plan),
            "configuration" => Some(ArtifactKind::Configuration),
            _ => None,
        }
    }
}

/// Serialized artifact ready to write or send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub body: String,
}

impl Artifact {
    pub fn new<T: Serialize>(kind: ArtifactKind, usecase_name: &str, value: &T) -> Result<Self, PlanError> {
        Ok(Self {
            filename: filename(kind, usecase_name),
            body: serde_json::to_string_pretty(value)?,
        })
    }
}

/// `<name>_<suffix>.json`, with path separators and control characters replaced.
///
/// An empty name becomes `usecase`.
pub fn filename(kind: ArtifactKind, usecase_name: &str) -> String {
    let cleaned: String = usecase_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    let stem = if cleaned.is_empty() { "usecase" } else { cleaned.as_str() };
    format!("{}_{}.json", stem, kind.suffix())
}

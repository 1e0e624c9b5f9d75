//! Planning error types.
//!
//! Every boundary that can fail (completion call, JSON extraction, stage
//! transitions) returns [`PlanError`]. A failure ends the current action only;
//! previously stored plans are never touched.

use thiserror::Error;

use crate::store::Stage;

/// Error returned by one planning action.
#[derive(Debug, Error)]
pub enum PlanError {
    /// No API key was configured, so generation is disabled rather than attempted.
    #[error("completion service credential is not configured (set GROQ_API_KEY)")]
    MissingCredential,

    /// The completion service could not be reached or returned an error.
    #[error("completion service error: {0}")]
    Transport(String),

    /// The completion text held no usable JSON object.
    ///
    /// `raw` is the full completion text so callers can show it for inspection.
    #[error("could not extract a plan from the model output: {reason}")]
    Extraction { reason: String, raw: String },

    /// The action needs a stage that is currently empty.
    #[error("{0} is not available yet")]
    MissingPrerequisite(Stage),

    /// A value of the wrong kind was stored under a stage key.
    #[error("cannot store a {found} under {stage}")]
    StageMismatch { stage: Stage, found: &'static str },

    /// Serializing a plan for download failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PlanError {
    /// Builds an extraction error carrying the raw completion text.
    pub fn extraction(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Extraction {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Short machine-readable kind, used in HTTP error bodies and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::Transport(_) => "transport",
            Self::Extraction { .. } => "extraction",
            Self::MissingPrerequisite(_) => "missing_prerequisite",
            Self::StageMismatch { .. } => "stage_mismatch",
            Self::Serialize(_) => "serialize",
        }
    }

    /// Raw completion text for extraction failures.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::Extraction { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_keeps_raw_text() {
        let err = PlanError::extraction("no JSON object found", "just prose");
        assert_eq!(err.kind(), "extraction");
        assert_eq!(err.raw_output(), Some("just prose"));
        assert!(err.to_string().contains("no JSON object found"));
    }

    #[test]
    fn missing_prerequisite_names_the_stage() {
        let err = PlanError::MissingPrerequisite(Stage::UseCaseDraft);
        assert!(err.to_string().contains("use-case draft"), "{}", err);
        assert!(err.raw_output().is_none());
    }
}

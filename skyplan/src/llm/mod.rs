//! Completion service abstraction.
//!
//! The planner depends on a callable that takes role-tagged messages and returns
//! free-form assistant text. [`ChatGroq`] talks to an OpenAI-compatible endpoint
//! (Groq by default); [`MockLlm`] returns scripted replies for tests.

mod groq;
mod mock;

pub use groq::{ChatGroq, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock::MockLlm;

use async_trait::async_trait;

use crate::error::PlanError;
use crate::message::Message;

/// Sampling parameters for one completion call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    /// Low values keep the JSON layout stable between calls.
    pub temperature: f32,
    /// Completion token ceiling.
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Parameters for the use-case draft (stage 1).
    pub const fn usecase() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 1000,
        }
    }

    /// Parameters for the configuration plan (stage 3).
    pub const fn configuration() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 1100,
        }
    }
}

/// Token usage for one call, when the service reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Assistant text returned by the completion service.
#[derive(Clone, Debug, Default)]
pub struct LlmResponse {
    pub content: String,
    pub usage: Option<LlmUsage>,
}

/// Completion service: given messages, returns assistant text.
///
/// Implementations map any network or API failure to [`PlanError::Transport`];
/// they never interpret the returned text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Runs one completion.
    async fn invoke(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<LlmResponse, PlanError>;
}

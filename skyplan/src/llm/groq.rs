//! OpenAI-compatible Chat Completions client implementing [`LlmClient`].
//!
//! Defaults to Groq's OpenAI-compatible endpoint; any compatible base URL works.
//! Requests are non-streaming: the planner needs the whole reply before it can
//! extract JSON from it.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::PlanError;
use crate::llm::{GenerationParams, LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;

/// Groq's OpenAI-compatible API base.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when `GROQ_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Chat Completions client for Groq (or another OpenAI-compatible service).
pub struct ChatGroq {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: String,
}

impl ChatGroq {
    /// Builds a client for `model` at `base_url` authenticated with `api_key`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let config = OpenAIConfig::new()
            .with_api_key(api_key.into())
            .with_api_base(base_url.clone());
        Self {
            client: Client::with_config(config),
            model: model.into(),
            base_url,
        }
    }

    /// Builds a client against [`DEFAULT_BASE_URL`].
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_BASE_URL, model)
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for ChatGroq {
    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<LlmResponse, PlanError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        args.temperature(params.temperature);
        args.max_completion_tokens(params.max_tokens);

        let request = args
            .build()
            .map_err(|e| PlanError::Transport(format!("request build failed: {}", e)))?;

        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            temperature = params.temperature,
            max_tokens = params.max_tokens,
            "chat completion create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "completion request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| PlanError::Transport(format!("API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "completion response body");
        }

        let usage = response.usage.as_ref().map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PlanError::Transport("service returned no choices".to_string()))?;

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

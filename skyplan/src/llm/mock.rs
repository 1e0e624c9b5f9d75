//! Mock completion service for tests and offline runs.
//!
//! Returns scripted replies in order (the last one repeats) or a fixed
//! transport error, and records every message list it received.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PlanError;
use crate::llm::{GenerationParams, LlmClient, LlmResponse};
use crate::message::Message;

/// Mock LLM with scripted replies.
pub struct MockLlm {
    replies: Vec<String>,
    failure: Option<String>,
    call_count: AtomicUsize,
    received: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Always replies with `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_replies(vec![content.into()])
    }

    /// Replies with each entry in turn; after the last one, keeps repeating it.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies,
            failure: None,
            call_count: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with a transport error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: Vec::new(),
            failure: Some(message.into()),
            call_count: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Number of completed or failed calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Message lists received, oldest first.
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received
            .lock()
            .map(|g| g.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    fn model(&self) -> &str {
        "mock"
    }

    async fn invoke(
        &self,
        messages: &[Message],
        _params: &GenerationParams,
    ) -> Result<LlmResponse, PlanError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.received.lock() {
            Ok(mut g) => g.push(messages.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(messages.to_vec()),
        }
        if let Some(ref msg) = self.failure {
            return Err(PlanError::Transport(msg.clone()));
        }
        let content = self
            .replies
            .get(n)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_default();
        Ok(LlmResponse {
            content,
            usage: None,
        })
    }
}

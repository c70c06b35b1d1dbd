pub mod openai;

pub use openai::OpenAIClient;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GenerationError;

/// A chat message sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// One completion request: model, conversation and sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can turn a chat request into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Canned generator that records every request it receives.
    ///
    /// Queued replies are handed out first; after that every call gets the
    /// standing reply, or `EmptyResponse` when there is none.
    pub struct FakeGenerator {
        queued: Mutex<VecDeque<Result<String, GenerationError>>>,
        standing: Option<String>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl FakeGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                queued: Mutex::new(VecDeque::new()),
                standing: Some(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: GenerationError) -> Self {
            Self {
                queued: Mutex::new(VecDeque::from([Err(error)])),
                standing: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Option<ChatRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(reply) = self.queued.lock().unwrap().pop_front() {
                return reply;
            }
            self.standing.clone().ok_or(GenerationError::EmptyResponse)
        }
    }
}

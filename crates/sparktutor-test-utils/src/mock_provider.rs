// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable chat provider for deterministic tests.
//!
//! `MockProvider` pops one [`MockReply`] per `complete()` call from a FIFO
//! queue and records every request it receives. When the queue is empty it
//! answers `"mock response"`.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sparktutor_core::{
    ChatCompletion, ChatProvider, ChatRequest, HealthStatus, TokenUsage, TutorError,
};

/// Text returned once the scripted replies run out.
pub const DEFAULT_REPLY: &str = "mock response";

/// One scripted outcome for a `complete()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Text(String),
    /// A provider error with this message.
    Fail(String),
    /// A provider-reported timeout carrying the request deadline.
    Timeout,
    /// A successful response with no text.
    Empty,
    /// Sleeps for the duration, then answers with the text.
    Delayed(Duration, String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        MockReply::Fail(message.into())
    }

    pub fn delayed(delay: Duration, text: impl Into<String>) -> Self {
        MockReply::Delayed(delay, text.into())
    }
}

pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<ChatRequest>>,
    health: HealthStatus,
}

impl MockProvider {
    /// A provider with an empty script.
    pub fn new() -> Self {
        Self::with_replies(Vec::<MockReply>::new())
    }

    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
            health: HealthStatus::Healthy,
        }
    }

    /// Sets what `health_check()` reports.
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    /// Appends a reply to the script.
    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::text(DEFAULT_REPLY))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, TutorError> {
        self.calls.lock().unwrap().push(request.clone());

        let text = match self.next_reply() {
            MockReply::Text(text) => text,
            MockReply::Fail(message) => return Err(TutorError::provider(message)),
            MockReply::Timeout => {
                return Err(TutorError::Timeout {
                    duration: request.timeout,
                });
            }
            MockReply::Empty => String::new(),
            MockReply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                text
            }
        };

        Ok(ChatCompletion {
            text,
            model: request.model,
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            }),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, TutorError> {
        Ok(self.health.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "test-model".into(),
            prompt: "hi".into(),
            temperature: 0.5,
            max_tokens: 100,
            timeout: Duration::from_secs(7),
        }
    }

    #[tokio::test]
    async fn default_reply_when_script_is_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.text, DEFAULT_REPLY);
        assert_eq!(resp.model, "test-model");
    }

    #[tokio::test]
    async fn replies_in_order_and_calls_recorded() {
        let provider = MockProvider::with_replies([MockReply::text("first"), MockReply::fail("nope")]);
        provider.push_reply(MockReply::Timeout);

        assert_eq!(provider.complete(request()).await.unwrap().text, "first");
        assert!(matches!(
            provider.complete(request()).await,
            Err(TutorError::Provider { .. })
        ));
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, TutorError::Timeout { duration } if duration == Duration::from_secs(7)));

        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.calls()[0].prompt, "hi");
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_reply_waits() {
        let provider = MockProvider::with_replies([MockReply::delayed(Duration::from_secs(3), "late")]);
        let start = tokio::time::Instant::now();
        let resp = provider.complete(request()).await.unwrap();
        assert_eq!(resp.text, "late");
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn health_is_configurable() {
        let provider = MockProvider::new().with_health(HealthStatus::Degraded("slow".into()));
        assert_eq!(
            provider.health_check().await.unwrap(),
            HealthStatus::Degraded("slow".into())
        );
    }
}

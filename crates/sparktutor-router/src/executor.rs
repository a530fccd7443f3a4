// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-tier query execution.
//!
//! [`TierExecutor::execute`] renders the tier prompt, consults the cache,
//! and makes at most one upstream call under the tier deadline. It never
//! returns an error: every failure is folded into a [`QueryResult`].

use std::sync::Arc;
use std::time::Duration;

use sparktutor_core::{ChatProvider, ChatRequest, TierKey, TutorError};
use tracing::{debug, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::tier::ModelTier;

pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Questions are cut to this many characters in failure logs.
const LOG_QUESTION_CHARS: usize = 80;

/// Why a tier attempt produced no answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryFailure {
    #[error("upstream timed out after {after:?}")]
    UpstreamTimeout { after: Duration },

    #[error("upstream request failed: {message}")]
    UpstreamTransport { message: String },

    #[error("upstream returned an empty response")]
    UpstreamEmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answered { text: String, cached: bool },
    Failed(QueryFailure),
}

/// Result of attempting one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub tier_used: TierKey,
    pub outcome: QueryOutcome,
}

impl QueryResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, QueryOutcome::Answered { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Answered { text, .. } => Some(text),
            QueryOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&QueryFailure> {
        match &self.outcome {
            QueryOutcome::Failed(failure) => Some(failure),
            QueryOutcome::Answered { .. } => None,
        }
    }

    /// Whether the answer came from the cache.
    pub fn cached(&self) -> bool {
        matches!(self.outcome, QueryOutcome::Answered { cached: true, .. })
    }
}

/// Runs a question against one tier.
pub struct TierExecutor {
    provider: Arc<dyn ChatProvider>,
    cache: Arc<dyn ResponseCache>,
    temperature: f32,
    max_tokens: u32,
}

impl TierExecutor {
    pub fn new(provider: Arc<dyn ChatProvider>, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            provider,
            cache,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Overrides the sampling parameters sent with every request.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn cache(&self) -> &Arc<dyn ResponseCache> {
        &self.cache
    }

    pub async fn execute(&self, tier: &ModelTier, question: &str) -> QueryResult {
        let prompt = tier.render_prompt(question);
        let key = CacheKey::new(prompt.clone(), tier.identifier.clone());

        if let Some(text) = self.cache.get(&key) {
            debug!(tier = %tier.key, model = %tier.identifier, "cache hit");
            return QueryResult {
                tier_used: tier.key,
                outcome: QueryOutcome::Answered { text, cached: true },
            };
        }

        let request = ChatRequest {
            model: tier.identifier.clone(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: tier.timeout,
        };

        let outcome = match tokio::time::timeout(tier.timeout, self.provider.complete(request)).await
        {
            Err(_elapsed) => Err(QueryFailure::UpstreamTimeout {
                after: tier.timeout,
            }),
            Ok(Err(e)) => Err(classify_error(e, tier.timeout)),
            Ok(Ok(completion)) if completion.text.trim().is_empty() => {
                Err(QueryFailure::UpstreamEmptyResponse)
            }
            Ok(Ok(completion)) => Ok(completion.text),
        };

        match outcome {
            Ok(text) => {
                self.cache.insert(key, text.clone());
                QueryResult {
                    tier_used: tier.key,
                    outcome: QueryOutcome::Answered {
                        text,
                        cached: false,
                    },
                }
            }
            Err(failure) => {
                warn!(
                    tier = %tier.key,
                    model = %tier.identifier,
                    question = %truncate(question, LOG_QUESTION_CHARS),
                    error = %failure,
                    "tier attempt failed"
                );
                QueryResult {
                    tier_used: tier.key,
                    outcome: QueryOutcome::Failed(failure),
                }
            }
        }
    }
}

fn classify_error(err: TutorError, deadline: Duration) -> QueryFailure {
    match err {
        TutorError::Timeout { duration } => QueryFailure::UpstreamTimeout {
            after: duration.min(deadline),
        },
        other => QueryFailure::UpstreamTransport {
            message: other.to_string(),
        },
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{BoundedCache, NoopCache};
    use crate::tier::PromptTemplate;
    use sparktutor_test_utils::{MockProvider, MockReply};
    use tracing_test::traced_test;

    fn tier(key: TierKey, model: &str, secs: u64) -> ModelTier {
        ModelTier::new(
            key,
            model,
            Duration::from_secs(secs),
            PromptTemplate::new("Q: {question}"),
        )
        .unwrap()
    }

    fn executor(provider: &Arc<MockProvider>) -> TierExecutor {
        TierExecutor::new(provider.clone(), Arc::new(BoundedCache::new(16)))
    }

    #[tokio::test]
    async fn answers_with_rendered_prompt_and_tier_parameters() {
        let provider = Arc::new(MockProvider::with_replies([MockReply::text("4")]));
        let result = executor(&provider)
            .execute(&tier(TierKey::Free, "gpt-3.5-turbo", 30), "What is 2+2?")
            .await;

        assert!(result.succeeded());
        assert_eq!(result.text(), Some("4"));
        assert_eq!(result.tier_used, TierKey::Free);
        assert!(!result.cached());

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-3.5-turbo");
        assert_eq!(calls[0].prompt, "Q: What is 2+2?");
        assert_eq!(calls[0].temperature, DEFAULT_TEMPERATURE);
        assert_eq!(calls[0].max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(calls[0].timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn second_identical_call_is_served_from_cache() {
        let provider = Arc::new(MockProvider::with_replies([MockReply::text("first")]));
        let executor = executor(&provider);
        let free = tier(TierKey::Free, "gpt-3.5-turbo", 30);

        let first = executor.execute(&free, "hi").await;
        let second = executor.execute(&free, "hi").await;

        assert_eq!(first.text(), second.text());
        assert!(second.cached());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn cache_is_per_model() {
        let provider = Arc::new(MockProvider::with_replies([
            MockReply::text("free answer"),
            MockReply::text("paid answer"),
        ]));
        let executor = executor(&provider);

        let a = executor.execute(&tier(TierKey::Free, "m1", 30), "hi").await;
        let b = executor.execute(&tier(TierKey::Paid, "m2", 30), "hi").await;
        assert_eq!(a.text(), Some("free answer"));
        assert_eq!(b.text(), Some("paid answer"));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_calls_upstream() {
        let provider = Arc::new(MockProvider::new());
        let executor = TierExecutor::new(provider.clone(), Arc::new(NoopCache));
        let free = tier(TierKey::Free, "m", 30);
        executor.execute(&free, "hi").await;
        executor.execute(&free, "hi").await;
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn provider_error_becomes_transport_failure() {
        let provider = Arc::new(MockProvider::with_replies([MockReply::fail("connection reset")]));
        let executor = executor(&provider);
        let result = executor.execute(&tier(TierKey::Paid, "gpt-4o", 60), "hi").await;

        assert!(!result.succeeded());
        assert!(result.text().is_none());
        match result.failure() {
            Some(QueryFailure::UpstreamTransport { message }) => {
                assert!(message.contains("connection reset"), "got: {message}");
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
        assert!(executor.cache().is_empty(), "failures are not cached");
    }

    #[tokio::test]
    async fn provider_timeout_becomes_timeout_failure() {
        let provider = Arc::new(MockProvider::with_replies([MockReply::Timeout]));
        let result = executor(&provider)
            .execute(&tier(TierKey::Free, "m", 30), "hi")
            .await;
        assert_eq!(
            result.failure(),
            Some(&QueryFailure::UpstreamTimeout {
                after: Duration::from_secs(30)
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_is_cut_off_at_the_tier_deadline() {
        let provider = Arc::new(MockProvider::with_replies([MockReply::delayed(
            Duration::from_secs(120),
            "too late",
        )]));
        let executor = executor(&provider);
        let result = executor.execute(&tier(TierKey::Paid, "gpt-4o", 5), "hi").await;

        assert_eq!(
            result.failure(),
            Some(&QueryFailure::UpstreamTimeout {
                after: Duration::from_secs(5)
            })
        );
        assert!(executor.cache().is_empty());
    }

    #[tokio::test]
    async fn blank_answer_is_empty_response_failure() {
        let provider = Arc::new(MockProvider::with_replies([
            MockReply::Empty,
            MockReply::text("  \n\t "),
        ]));
        let executor = executor(&provider);
        let free = tier(TierKey::Free, "m", 30);

        for _ in 0..2 {
            let result = executor.execute(&free, "hi").await;
            assert_eq!(result.failure(), Some(&QueryFailure::UpstreamEmptyResponse));
        }
        assert!(executor.cache().is_empty());
    }

    #[tokio::test]
    async fn custom_sampling_is_forwarded() {
        let provider = Arc::new(MockProvider::new());
        let executor = executor(&provider).with_sampling(0.9, 64);
        executor.execute(&tier(TierKey::Free, "m", 30), "hi").await;
        let calls = provider.calls();
        assert_eq!(calls[0].temperature, 0.9);
        assert_eq!(calls[0].max_tokens, 64);
    }

    #[tokio::test]
    #[traced_test]
    async fn failure_log_truncates_question() {
        let provider = Arc::new(MockProvider::with_replies([MockReply::fail("boom")]));
        let long_question = format!("{}{}", "a".repeat(80), "TAILMARKER");
        executor(&provider)
            .execute(&tier(TierKey::Paid, "gpt-4o", 60), &long_question)
            .await;

        assert!(logs_contain("tier attempt failed"));
        assert!(logs_contain("gpt-4o"));
        assert!(!logs_contain("TAILMARKER"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("ééé", 2), "éé...");
        assert_eq!(truncate(&"x".repeat(80), 80), "x".repeat(80));
    }
}

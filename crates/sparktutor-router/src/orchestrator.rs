// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query orchestration: tier selection, one bounded fallback, final text.
//!
//! Per query:
//! 1. classify, picking `paid` on escalation and `free` otherwise
//! 2. execute on the selected tier
//! 3. only if `paid` failed, execute once on `reason`
//! 4. answer with the result text, or the fallback message
//!
//! The free tier never retries. At most two upstream calls happen per query.

use std::sync::Arc;

use sparktutor_config::model::TutorConfig;
use sparktutor_core::{ChatProvider, TierKey, TutorError};
use tracing::{Instrument, info, info_span, warn};

use crate::cache::{BoundedCache, NoopCache, ResponseCache};
use crate::classifier::ComplexityClassifier;
use crate::executor::TierExecutor;
use crate::tier::TierRegistry;

/// Returned when no tier produced an answer.
pub const FALLBACK_MESSAGE: &str = "I couldn't generate a response for this question.";

/// One question plus the answer the user saw last, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub question: String,
    /// Empty when there was no earlier answer.
    pub previous_response: String,
}

impl Query {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            previous_response: String::new(),
        }
    }

    pub fn with_previous_response(mut self, previous: impl Into<String>) -> Self {
        self.previous_response = previous.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    /// The selected tier answered.
    Answered,
    /// The selected tier failed and the reason tier answered.
    AnsweredByFallbackTier,
    /// Nothing answered; the text is the fallback message.
    Unanswered,
}

/// What the orchestrator produced for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub tier_selected: TierKey,
    pub tier_used: Option<TierKey>,
    pub status: AnswerStatus,
}

pub struct Orchestrator {
    classifier: ComplexityClassifier,
    tiers: TierRegistry,
    executor: TierExecutor,
    fallback_message: String,
}

impl Orchestrator {
    pub fn new(classifier: ComplexityClassifier, tiers: TierRegistry, executor: TierExecutor) -> Self {
        Self {
            classifier,
            tiers,
            executor,
            fallback_message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    /// Builds the full pipeline from a validated configuration.
    pub fn from_config(
        config: &TutorConfig,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, TutorError> {
        let tiers = TierRegistry::from_config(&config.tiers)?;
        let cache: Arc<dyn ResponseCache> = if config.cache.enabled {
            Arc::new(BoundedCache::new(config.cache.max_entries))
        } else {
            Arc::new(NoopCache)
        };
        let executor = TierExecutor::new(provider, cache)
            .with_sampling(config.upstream.temperature, config.upstream.max_tokens);

        Ok(Self::new(
            ComplexityClassifier::from_config(&config.routing),
            tiers,
            executor,
        )
        .with_fallback_message(config.routing.fallback_message.clone()))
    }

    /// The answer text for `question`. Never fails.
    pub async fn get_response(&self, question: &str, previous_response: &str) -> String {
        let query = Query::new(question).with_previous_response(previous_response);
        self.answer(&query).await.text
    }

    pub async fn answer(&self, query: &Query) -> Answer {
        let span = info_span!("answer", request_id = %uuid::Uuid::new_v4());
        self.answer_inner(query).instrument(span).await
    }

    async fn answer_inner(&self, query: &Query) -> Answer {
        let trigger = self
            .classifier
            .escalation_trigger(&query.question, &query.previous_response);
        let selected = if trigger.is_some() {
            TierKey::Paid
        } else {
            TierKey::Free
        };
        let tier = self.tiers.get(selected);
        match trigger {
            Some(trigger) => info!(tier = %selected, model = %tier.identifier, %trigger, "tier selected"),
            None => info!(tier = %selected, model = %tier.identifier, "tier selected"),
        }

        let result = self.executor.execute(tier, &query.question).await;
        if let Some(text) = result.text() {
            return Answer {
                text: text.to_string(),
                tier_selected: selected,
                tier_used: Some(selected),
                status: AnswerStatus::Answered,
            };
        }

        if selected == TierKey::Paid {
            let reason = self.tiers.get(TierKey::Reason);
            info!(model = %reason.identifier, "paid tier failed, trying reason tier");
            let retry = self.executor.execute(reason, &query.question).await;
            if let Some(text) = retry.text() {
                return Answer {
                    text: text.to_string(),
                    tier_selected: selected,
                    tier_used: Some(TierKey::Reason),
                    status: AnswerStatus::AnsweredByFallbackTier,
                };
            }
        }

        warn!(tier = %selected, "no tier produced an answer, returning fallback message");
        Answer {
            text: self.fallback_message.clone(),
            tier_selected: selected,
            tier_used: None,
            status: AnswerStatus::Unanswered,
        }
    }
}

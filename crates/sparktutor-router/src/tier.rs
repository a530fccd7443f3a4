// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model tier registry.

use std::time::Duration;

use sparktutor_config::model::{QUESTION_PLACEHOLDER, TiersConfig};
use sparktutor_core::{TierKey, TutorError};

/// Prompt template with a `{question}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Substitutes every `{question}` with the question text.
    pub fn render(&self, question: &str) -> String {
        self.0.replace(QUESTION_PLACEHOLDER, question)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One backend model configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTier {
    pub key: TierKey,
    /// Upstream model name.
    pub identifier: String,
    pub timeout: Duration,
    pub prompt_template: PromptTemplate,
}

impl ModelTier {
    /// Builds a tier, rejecting a blank identifier or zero timeout.
    pub fn new(
        key: TierKey,
        identifier: impl Into<String>,
        timeout: Duration,
        prompt_template: PromptTemplate,
    ) -> Result<Self, TutorError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(TutorError::Config(format!("tier {key} has an empty model identifier")));
        }
        if timeout.is_zero() {
            return Err(TutorError::Config(format!("tier {key} has a zero timeout")));
        }
        Ok(Self {
            key,
            identifier,
            timeout,
            prompt_template,
        })
    }

    /// The upstream prompt for a question.
    pub fn render_prompt(&self, question: &str) -> String {
        self.prompt_template.render(question)
    }
}

/// Exactly one [`ModelTier`] per [`TierKey`].
#[derive(Debug, Clone)]
pub struct TierRegistry {
    free: ModelTier,
    paid: ModelTier,
    reason: ModelTier,
}

impl TierRegistry {
    pub fn new(free: ModelTier, paid: ModelTier, reason: ModelTier) -> Result<Self, TutorError> {
        for (expected, tier) in [
            (TierKey::Free, &free),
            (TierKey::Paid, &paid),
            (TierKey::Reason, &reason),
        ] {
            if tier.key != expected {
                return Err(TutorError::Config(format!(
                    "tier registered as {expected} carries key {}",
                    tier.key
                )));
            }
        }
        Ok(Self { free, paid, reason })
    }

    pub fn from_config(config: &TiersConfig) -> Result<Self, TutorError> {
        let build = |key: TierKey| {
            let tier = config.get(key);
            ModelTier::new(
                key,
                tier.model.clone(),
                Duration::from_secs(tier.timeout_secs),
                PromptTemplate::new(tier.prompt_template.clone()),
            )
        };
        Self::new(
            build(TierKey::Free)?,
            build(TierKey::Paid)?,
            build(TierKey::Reason)?,
        )
    }

    pub fn get(&self, key: TierKey) -> &ModelTier {
        match key {
            TierKey::Free => &self.free,
            TierKey::Paid => &self.paid,
            TierKey::Reason => &self.reason,
        }
    }

    /// Tiers in escalation order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelTier> {
        [&self.free, &self.paid, &self.reason].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_registry() -> TierRegistry {
        TierRegistry::from_config(&TiersConfig::default()).unwrap()
    }

    #[test]
    fn render_substitutes_question() {
        let t = PromptTemplate::new("Provide a helpful response to: {question}");
        assert_eq!(t.render("hi"), "Provide a helpful response to: hi");
    }

    #[test]
    fn render_substitutes_every_placeholder() {
        let t = PromptTemplate::new("{question} / {question}");
        assert_eq!(t.render("x"), "x / x");
    }

    #[test]
    fn default_registry_matches_config_defaults() {
        let registry = default_registry();
        assert_eq!(registry.get(TierKey::Free).identifier, "gpt-3.5-turbo");
        assert_eq!(registry.get(TierKey::Paid).identifier, "gpt-4o");
        assert_eq!(registry.get(TierKey::Reason).identifier, "gpt-4-turbo");
        assert_eq!(registry.get(TierKey::Paid).timeout, Duration::from_secs(60));
        let keys: Vec<TierKey> = registry.iter().map(|t| t.key).collect();
        assert_eq!(keys, vec![TierKey::Free, TierKey::Paid, TierKey::Reason]);
    }

    #[test]
    fn reason_prompt_is_structured() {
        let registry = default_registry();
        let prompt = registry.get(TierKey::Reason).render_prompt("Why is the sky blue?");
        assert!(prompt.starts_with("Perform rigorous step-by-step analysis:\n1. Problem: Why is the sky blue?\n"));
        assert!(prompt.ends_with("4. Final synthesized answer"));
    }

    #[test]
    fn empty_identifier_rejected() {
        let err = ModelTier::new(
            TierKey::Free,
            " ",
            Duration::from_secs(1),
            PromptTemplate::new("{question}"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty model identifier"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = ModelTier::new(
            TierKey::Paid,
            "gpt-4o",
            Duration::ZERO,
            PromptTemplate::new("{question}"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("zero timeout"));
    }

    #[test]
    fn mismatched_key_rejected() {
        let tier = |key| {
            ModelTier::new(key, "m", Duration::from_secs(1), PromptTemplate::new("{question}"))
                .unwrap()
        };
        let result = TierRegistry::new(tier(TierKey::Free), tier(TierKey::Free), tier(TierKey::Reason));
        assert!(result.is_err());
    }
}

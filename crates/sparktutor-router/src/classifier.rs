// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic escalation classification.
//!
//! Decides whether a question goes to the paid tier using three zero-cost
//! rules checked in a fixed order. No LLM pre-call, no network.

use sparktutor_config::model::RoutingConfig;

/// Phrases in the previous answer that mean the user wants a better one.
pub const DISSATISFACTION_TRIGGERS: &[&str] = &[
    "not satisfied",
    "explain better",
    "more detail",
    "incomplete answer",
];

/// Phrases in the question that ask for detailed analysis.
pub const TECHNICAL_TERMS: &[&str] = &[
    "explain in detail",
    "step-by-step",
    "prove that",
    "compare and contrast",
];

/// Questions with more whitespace-separated words than this escalate.
pub const COMPLEXITY_THRESHOLD: usize = 15;

/// The rule that caused an escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationTrigger {
    /// The previous response mentions a dissatisfaction phrase.
    Dissatisfaction,
    /// The question is longer than the word threshold.
    Length,
    /// The question contains an analysis phrase.
    TechnicalTerm,
}

impl std::fmt::Display for EscalationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscalationTrigger::Dissatisfaction => write!(f, "dissatisfaction"),
            EscalationTrigger::Length => write!(f, "length"),
            EscalationTrigger::TechnicalTerm => write!(f, "technical term"),
        }
    }
}

/// First-match-wins escalation classifier.
#[derive(Debug, Clone)]
pub struct ComplexityClassifier {
    threshold: usize,
    /// Stored lowercased.
    dissatisfaction: Vec<String>,
    /// Stored lowercased.
    technical: Vec<String>,
}

impl ComplexityClassifier {
    /// Classifier with the built-in phrase sets and threshold.
    pub fn new() -> Self {
        Self::with_rules(
            COMPLEXITY_THRESHOLD,
            DISSATISFACTION_TRIGGERS.iter().copied(),
            TECHNICAL_TERMS.iter().copied(),
        )
    }

    /// Classifier with custom rules.
    pub fn with_rules<'a>(
        threshold: usize,
        dissatisfaction: impl IntoIterator<Item = &'a str>,
        technical: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            threshold,
            dissatisfaction: dissatisfaction.into_iter().map(str::to_lowercase).collect(),
            technical: technical.into_iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::with_rules(
            config.complexity_threshold,
            config.dissatisfaction_triggers.iter().map(String::as_str),
            config.technical_terms.iter().map(String::as_str),
        )
    }

    /// Whether the question should go to the paid tier.
    pub fn needs_escalation(&self, question: &str, previous_response: &str) -> bool {
        self.escalation_trigger(question, previous_response).is_some()
    }

    /// The first rule that fires, in precedence order, or `None`.
    pub fn escalation_trigger(
        &self,
        question: &str,
        previous_response: &str,
    ) -> Option<EscalationTrigger> {
        if !previous_response.is_empty() && contains_any(previous_response, &self.dissatisfaction) {
            return Some(EscalationTrigger::Dissatisfaction);
        }

        if question.split_whitespace().count() > self.threshold {
            return Some(EscalationTrigger::Length);
        }

        if contains_any(question, &self.technical) {
            return Some(EscalationTrigger::TechnicalTerm);
        }

        None
    }
}

impl Default for ComplexityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    let lower = text.to_lowercase();
    phrases.iter().any(|p| lower.contains(p.as_str()))
}

// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the SparkTutor answer engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is a
//! startup error rather than a silently ignored setting.

use serde::{Deserialize, Serialize};
use sparktutor_core::TierKey;

/// Placeholder substituted by the question text in every prompt template.
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Top-level SparkTutor configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TutorConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Upstream chat-completions endpoint settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Model tier definitions.
    #[serde(default)]
    pub tiers: TiersConfig,

    /// Escalation heuristics and fallback text.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Pre-orchestrator screening and prompt rewriting.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the shell banner.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "sparktutor".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Upstream OpenAI-compatible API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key. `None` falls back to the `api_key_env` variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature for every tier.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output length cap for every tier.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    500
}

/// The three model tiers. One section per [`TierKey`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TiersConfig {
    #[serde(default = "default_free_tier")]
    pub free: TierConfig,

    #[serde(default = "default_paid_tier")]
    pub paid: TierConfig,

    #[serde(default = "default_reason_tier")]
    pub reason: TierConfig,
}

impl TiersConfig {
    /// Returns the section for a tier key.
    pub fn get(&self, key: TierKey) -> &TierConfig {
        match key {
            TierKey::Free => &self.free,
            TierKey::Paid => &self.paid,
            TierKey::Reason => &self.reason,
        }
    }
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            free: default_free_tier(),
            paid: default_paid_tier(),
            reason: default_reason_tier(),
        }
    }
}

/// A single model tier.
///
/// Through the Figment loader a partial section merges over the compiled
/// default of its tier, so `[tiers.paid]` with only `model` keeps the paid
/// template. Plain `toml::from_str` needs every field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    /// Upstream model identifier.
    pub model: String,

    /// Per-call deadline in seconds.
    pub timeout_secs: u64,

    /// Prompt template containing `{question}`.
    pub prompt_template: String,
}

fn default_free_tier() -> TierConfig {
    TierConfig {
        model: "gpt-3.5-turbo".to_string(),
        timeout_secs: 30,
        prompt_template: "Provide a helpful response to: {question}".to_string(),
    }
}

fn default_paid_tier() -> TierConfig {
    TierConfig {
        model: "gpt-4o".to_string(),
        timeout_secs: 60,
        prompt_template: "As an expert, analyze this in depth:\n{question}\n\
                          Include examples and practical applications."
            .to_string(),
    }
}

fn default_reason_tier() -> TierConfig {
    TierConfig {
        model: "gpt-4-turbo".to_string(),
        timeout_secs: 90,
        prompt_template: "Perform rigorous step-by-step analysis:\n\
                          1. Problem: {question}\n\
                          2. Key components\n\
                          3. Logical relationships\n\
                          4. Final synthesized answer"
            .to_string(),
    }
}

/// Escalation heuristics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Questions with more words than this escalate to the paid tier.
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: usize,

    /// Phrases in the previous answer's context that signal dissatisfaction.
    #[serde(default = "default_dissatisfaction_triggers")]
    pub dissatisfaction_triggers: Vec<String>,

    /// Phrases in the question that demand detailed analysis.
    #[serde(default = "default_technical_terms")]
    pub technical_terms: Vec<String>,

    /// Text returned when no tier produced an answer.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            dissatisfaction_triggers: default_dissatisfaction_triggers(),
            technical_terms: default_technical_terms(),
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_complexity_threshold() -> usize {
    15
}

fn default_dissatisfaction_triggers() -> Vec<String> {
    ["not satisfied", "explain better", "more detail", "incomplete answer"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_technical_terms() -> Vec<String> {
    ["explain in detail", "step-by-step", "prove that", "compare and contrast"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_fallback_message() -> String {
    "I couldn't generate a response for this question.".to_string()
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Disable to send every request upstream.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Maximum entries before the oldest-inserted entry is evicted.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_max_entries() -> usize {
    256
}

/// Intake screening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Reject questions the keyword screen marks as non-educational.
    #[serde(default = "default_educational_filter")]
    pub educational_filter: bool,

    /// Wrap accepted questions in the formatting guidance prompt.
    #[serde(default)]
    pub enhance_prompts: bool,

    /// How to treat questions the keyword screen cannot decide.
    #[serde(default = "default_undecided_is_educational")]
    pub undecided_is_educational: bool,

    /// Reply sent instead of an answer when a question is rejected.
    #[serde(default = "default_non_educational_reply")]
    pub non_educational_reply: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            educational_filter: default_educational_filter(),
            enhance_prompts: false,
            undecided_is_educational: default_undecided_is_educational(),
            non_educational_reply: default_non_educational_reply(),
        }
    }
}

fn default_educational_filter() -> bool {
    true
}

fn default_undecided_is_educational() -> bool {
    true
}

fn default_non_educational_reply() -> String {
    "I specialize in educational content. Please ask about academic subjects \
     like math, science, history, or other learning topics."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tiers_match_known_models() {
        let tiers = TiersConfig::default();
        assert_eq!(tiers.get(TierKey::Free).model, "gpt-3.5-turbo");
        assert_eq!(tiers.get(TierKey::Paid).model, "gpt-4o");
        assert_eq!(tiers.get(TierKey::Reason).model, "gpt-4-turbo");
        for key in [TierKey::Free, TierKey::Paid, TierKey::Reason] {
            assert!(tiers.get(key).prompt_template.contains(QUESTION_PLACEHOLDER));
            assert!(tiers.get(key).timeout_secs > 0);
        }
    }

    #[test]
    fn paid_template_keeps_line_breaks() {
        let paid = default_paid_tier();
        assert_eq!(
            paid.prompt_template,
            "As an expert, analyze this in depth:\n{question}\nInclude examples and practical applications."
        );
    }

    #[test]
    fn routing_defaults() {
        let routing = RoutingConfig::default();
        assert_eq!(routing.complexity_threshold, 15);
        assert_eq!(routing.dissatisfaction_triggers.len(), 4);
        assert!(routing.technical_terms.contains(&"prove that".to_string()));
        assert_eq!(
            routing.fallback_message,
            "I couldn't generate a response for this question."
        );
    }

    #[test]
    fn partial_tier_section_requires_all_fields() {
        let toml_str = r#"
[tiers.free]
model = "local-small"
"#;
        let result = toml::from_str::<TutorConfig>(toml_str);
        assert!(result.is_err(), "tier sections are replaced as a whole");
    }

    #[test]
    fn full_tier_section_overrides_default() {
        let toml_str = r#"
[tiers.reason]
model = "deepseek-reasoner"
timeout_secs = 120
prompt_template = "Think hard: {question}"
"#;
        let config: TutorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tiers.reason.model, "deepseek-reasoner");
        assert_eq!(config.tiers.reason.timeout_secs, 120);
        assert_eq!(config.tiers.free, default_free_tier());
    }
}

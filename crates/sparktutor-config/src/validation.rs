// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: tier invariants, numeric
//! ranges, and non-empty phrase lists. All problems are collected.

use sparktutor_core::TierKey;
use strum::IntoEnumIterator;

use crate::diagnostic::ConfigError;
use crate::model::{QUESTION_PLACEHOLDER, TutorConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Returns every violation found rather than stopping at the first.
pub fn validate_config(config: &TutorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let base_url = config.upstream.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::validation("upstream.base_url must not be empty"));
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::validation(format!(
            "upstream.base_url `{base_url}` must start with http:// or https://"
        )));
    }

    let temperature = config.upstream.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::validation(format!(
            "upstream.temperature must be between 0 and 2, got {temperature}"
        )));
    }

    if config.upstream.max_tokens == 0 {
        errors.push(ConfigError::validation("upstream.max_tokens must be at least 1"));
    }

    if config.upstream.api_key.is_none() && config.upstream.api_key_env.trim().is_empty() {
        errors.push(ConfigError::validation(
            "upstream.api_key_env must not be empty when upstream.api_key is unset",
        ));
    }

    for key in TierKey::iter() {
        let tier = config.tiers.get(key);
        if tier.model.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "tiers.{key}.model must not be empty"
            )));
        }
        if tier.timeout_secs == 0 {
            errors.push(ConfigError::validation(format!(
                "tiers.{key}.timeout_secs must be positive"
            )));
        }
        if !tier.prompt_template.contains(QUESTION_PLACEHOLDER) {
            errors.push(ConfigError::validation(format!(
                "tiers.{key}.prompt_template must contain `{QUESTION_PLACEHOLDER}`"
            )));
        }
    }

    for (name, phrases) in [
        ("dissatisfaction_triggers", &config.routing.dissatisfaction_triggers),
        ("technical_terms", &config.routing.technical_terms),
    ] {
        if let Some(i) = phrases.iter().position(|p| p.trim().is_empty()) {
            errors.push(ConfigError::validation(format!(
                "routing.{name}[{i}] must not be empty"
            )));
        }
    }

    if config.routing.fallback_message.trim().is_empty() {
        errors.push(ConfigError::validation(
            "routing.fallback_message must not be empty",
        ));
    }

    if config.cache.enabled && config.cache.max_entries == 0 {
        errors.push(ConfigError::validation(
            "cache.max_entries must be at least 1 when the cache is enabled",
        ));
    }

    if config.intake.educational_filter && config.intake.non_educational_reply.trim().is_empty() {
        errors.push(ConfigError::validation(
            "intake.non_educational_reply must not be empty when the filter is on",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

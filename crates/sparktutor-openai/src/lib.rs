// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for the SparkTutor answer engine.
//!
//! Works against OpenAI, OpenRouter, DeepSeek, or any endpoint speaking the
//! `/chat/completions` dialect.

pub mod client;
pub mod redact;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use sparktutor_config::model::UpstreamConfig;
use sparktutor_core::{
    ChatCompletion, ChatProvider, ChatRequest, HealthStatus, TokenUsage, TutorError,
};
use tracing::info;

use crate::client::OpenAiClient;
use crate::types::{CompletionRequest, WireMessage};

/// Deadline for the `GET /models` health probe.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Chat provider backed by an OpenAI-compatible HTTP API.
///
/// API key resolution order: `upstream.api_key` -> the environment variable
/// named by `upstream.api_key_env` -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from the `[upstream]` config section.
    pub fn new(config: &UpstreamConfig) -> Result<Self, TutorError> {
        let api_key = resolve_api_key(config)?;
        let client = OpenAiClient::new(api_key, &config.base_url)?;
        info!(endpoint = client.endpoint(), "upstream provider initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, TutorError> {
        let wire = CompletionRequest {
            model: request.model.clone(),
            messages: vec![WireMessage::user(request.prompt)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        let response = self.client.complete(&wire, request.timeout).await?;

        let text = response.first_text().to_string();
        let model = if response.model.is_empty() {
            request.model
        } else {
            response.model
        };
        Ok(ChatCompletion {
            text,
            model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, TutorError> {
        Ok(self.client.health(HEALTH_TIMEOUT).await)
    }
}

fn resolve_api_key(config: &UpstreamConfig) -> Result<String, TutorError> {
    if let Some(key) = &config.api_key
        && !key.trim().is_empty()
    {
        return Ok(key.clone());
    }

    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(TutorError::Config(format!(
            "upstream API key not found. Set upstream.api_key in config or the {} environment variable.",
            config.api_key_env
        ))),
    }
}

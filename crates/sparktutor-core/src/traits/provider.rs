// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for upstream LLM integrations (OpenAI-compatible APIs, mocks).

use async_trait::async_trait;

use crate::error::TutorError;
use crate::types::{ChatCompletion, ChatRequest, HealthStatus};

/// An upstream chat-completion service.
///
/// Implementations must honor `request.timeout` and report an expired
/// deadline as [`TutorError::Timeout`].
#[async_trait]
pub trait ChatProvider: Send + Sync + 'static {
    /// Human-readable adapter name, used in logs.
    fn name(&self) -> &str;

    /// Issues one completion call. No retries.
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, TutorError>;

    /// Reports whether the provider looks usable without spending tokens.
    async fn health_check(&self) -> Result<HealthStatus, TutorError>;
}

// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the provider trait and the answer engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Symbolic name of a model tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TierKey {
    /// Cheap default model for short, simple questions.
    Free,
    /// Stronger model used when a question is escalated.
    Paid,
    /// Slow reasoning model, only reached as the paid tier's fallback.
    Reason,
}

/// Health status reported by provider health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Provider is fully operational.
    Healthy,
    /// Provider is reachable but misbehaving.
    Degraded(String),
    /// Provider is not operational.
    Unhealthy(String),
}

/// A single-turn chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Upstream model identifier.
    pub model: String,
    /// Fully rendered user prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output length cap.
    pub max_tokens: u32,
    /// Deadline for the whole call.
    pub timeout: Duration,
}

/// Token accounting returned by the upstream, when it reports any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// The text produced by a successful completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    /// Assistant message content. May be empty; callers decide what that means.
    pub text: String,
    /// Model that actually served the request.
    pub model: String,
    pub usage: Option<TokenUsage>,
}

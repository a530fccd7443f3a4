// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the SparkTutor answer engine.

use std::time::Duration;

use thiserror::Error;

/// The error type shared by provider adapters and startup code.
///
/// The query path never surfaces this to end users: the executor folds it
/// into a `QueryFailure` and the orchestrator answers with fallback text.
#[derive(Debug, Error)]
pub enum TutorError {
    /// Configuration errors (missing API key, invalid header values, bad tiers).
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream LLM errors (HTTP failure, non-2xx status, malformed body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The upstream call exceeded its deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TutorError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        TutorError::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error represents an expired deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TutorError::Timeout { .. })
    }
}

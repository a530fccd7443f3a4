// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat completions endpoints.
//!
//! [`OpenAiClient`] builds authenticated requests, enforces a per-call
//! deadline, and turns non-2xx answers into provider errors. It never
//! retries; tier fallback happens in the router. Health is probed with
//! `GET {base_url}/models`, which costs no tokens.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use sparktutor_core::{HealthStatus, TutorError};
use tracing::debug;

use crate::redact::redact;
use crate::types::{ApiErrorResponse, CompletionRequest, CompletionResponse};

/// Connection establishment budget, independent of the per-tier deadline.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for one upstream endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    models_endpoint: String,
    api_key: String,
}

impl OpenAiClient {
    /// Creates a client for `{base_url}/chat/completions`.
    pub fn new(api_key: String, base_url: &str) -> Result<Self, TutorError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| TutorError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TutorError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client,
            endpoint: format!("{base}/chat/completions"),
            models_endpoint: format!("{base}/models"),
            api_key,
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one completion request bounded by `timeout`.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> Result<CompletionResponse, TutorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, timeout))?;

        let status = response.status();
        debug!(status = %status, model = request.model, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, timeout))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => match api_err.error.type_ {
                    Some(kind) => format!("upstream error {status} ({kind}): {}", api_err.error.message),
                    None => format!("upstream error {status}: {}", api_err.error.message),
                },
                Err(_) => format!("upstream returned {status}: {body}"),
            };
            return Err(TutorError::provider(self.scrub(&message)));
        }

        serde_json::from_str(&body).map_err(|e| TutorError::Provider {
            message: format!("failed to parse completion response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Lists models to see whether the upstream answers and accepts the key.
    ///
    /// A refused key or an unreachable host is `Unhealthy`; any other
    /// non-2xx status is `Degraded`.
    pub async fn health(&self, timeout: Duration) -> HealthStatus {
        let response = match self
            .client
            .get(&self.models_endpoint)
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return HealthStatus::Unhealthy(format!("no answer within {timeout:?}"));
            }
            Err(e) => {
                return HealthStatus::Unhealthy(self.scrub(&format!("unreachable: {e}")));
            }
        };

        let status = response.status();
        debug!(status = %status, "health probe response received");
        match status {
            s if s.is_success() => HealthStatus::Healthy,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                HealthStatus::Unhealthy(format!("API key rejected ({status})"))
            }
            _ => HealthStatus::Degraded(format!("models endpoint returned {status}")),
        }
    }

    fn transport_error(&self, err: reqwest::Error, timeout: Duration) -> TutorError {
        if err.is_timeout() {
            return TutorError::Timeout { duration: timeout };
        }
        TutorError::Provider {
            message: self.scrub(&format!("HTTP request failed: {err}")),
            source: Some(Box::new(err)),
        }
    }

    fn scrub(&self, text: &str) -> String {
        redact(text, &[self.api_key.as_str()])
    }
}

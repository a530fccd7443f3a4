// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end answer tests.
//!
//! `TestHarness` wires a [`MockProvider`] into a real [`Orchestrator`] and
//! [`Intake`] built from a [`TutorConfig`], so tests drive the same pipeline
//! the binary does.

use std::sync::Arc;

use sparktutor_config::model::TutorConfig;
use sparktutor_core::TutorError;
use sparktutor_intake::{Intake, Prepared};
use sparktutor_router::{Answer, Orchestrator, Query};

use crate::mock_provider::{MockProvider, MockReply};

pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    config: TutorConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            config: TutorConfig::default(),
        }
    }

    /// Scripted provider replies, consumed one per upstream call.
    pub fn with_replies(mut self, replies: impl IntoIterator<Item = MockReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: TutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Adjusts the configuration in place.
    pub fn configure(mut self, f: impl FnOnce(&mut TutorConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn build(self) -> Result<TestHarness, TutorError> {
        let provider = Arc::new(MockProvider::with_replies(self.replies));
        let orchestrator = Orchestrator::from_config(&self.config, provider.clone())?;
        let intake = Intake::new(self.config.intake.clone());
        Ok(TestHarness {
            provider,
            orchestrator: Arc::new(orchestrator),
            intake,
            config: self.config,
        })
    }
}

pub struct TestHarness {
    pub provider: Arc<MockProvider>,
    pub orchestrator: Arc<Orchestrator>,
    pub intake: Intake,
    pub config: TutorConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness over the default configuration.
    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Result<Self, TutorError> {
        Self::builder().with_replies(replies).build()
    }

    /// Sends a message through intake and, if accepted, the orchestrator.
    pub async fn send_message(&self, message: &str, previous_response: &str) -> String {
        match self.intake.prepare(message) {
            Prepared::Rejected { reply } => reply,
            Prepared::Accepted { question } => {
                self.orchestrator
                    .get_response(&question, previous_response)
                    .await
            }
        }
    }

    /// Asks the orchestrator directly, bypassing intake.
    pub async fn answer(&self, query: &Query) -> Answer {
        self.orchestrator.answer(query).await
    }
}

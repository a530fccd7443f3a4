// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question intake for the SparkTutor answer engine.
//!
//! Sits in front of the orchestrator: rejects off-topic questions with a
//! fixed reply and optionally rewrites accepted ones with formatting
//! guidance.

pub mod enhance;
pub mod filter;

pub use enhance::{EMPTY_QUESTION_REPLY, Intent, enhance_question};
pub use filter::{KeywordScreen, Screening};

use sparktutor_config::model::IntakeConfig;
use tracing::{debug, info};

/// Result of preparing a user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// Do not call the orchestrator; send `reply` instead.
    Rejected { reply: String },
    /// Send `question` to the orchestrator.
    Accepted { question: String },
}

#[derive(Debug, Clone)]
pub struct Intake {
    screen: KeywordScreen,
    config: IntakeConfig,
}

impl Intake {
    pub fn new(config: IntakeConfig) -> Self {
        Self::with_screen(KeywordScreen::default(), config)
    }

    pub fn with_screen(screen: KeywordScreen, config: IntakeConfig) -> Self {
        Self { screen, config }
    }

    /// Screens and optionally enhances a raw message.
    ///
    /// A blank message is rejected with [`EMPTY_QUESTION_REPLY`].
    pub fn prepare(&self, message: &str) -> Prepared {
        let message = message.trim();
        if message.is_empty() {
            return Prepared::Rejected {
                reply: EMPTY_QUESTION_REPLY.to_string(),
            };
        }

        if self.config.educational_filter && !self.is_educational(message) {
            info!("question rejected by educational filter");
            return Prepared::Rejected {
                reply: self.config.non_educational_reply.clone(),
            };
        }

        let question = if self.config.enhance_prompts {
            enhance_question(message)
        } else {
            message.to_string()
        };
        Prepared::Accepted { question }
    }

    fn is_educational(&self, message: &str) -> bool {
        match self.screen.screen(message) {
            Screening::Educational => true,
            Screening::NonEducational => false,
            Screening::Undecided => {
                debug!(
                    accepted = self.config.undecided_is_educational,
                    "keyword screen undecided"
                );
                self.config.undecided_is_educational
            }
        }
    }
}

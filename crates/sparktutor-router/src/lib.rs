// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tiered answer routing for the SparkTutor answer engine.
//!
//! Picks a model tier per question with zero-cost heuristics, runs it
//! through a shared response cache, and falls back once from the paid tier
//! to the reasoning tier before giving up with a fixed message.

pub mod cache;
pub mod classifier;
pub mod executor;
pub mod orchestrator;
pub mod tier;

pub use cache::{BoundedCache, CacheKey, NoopCache, ResponseCache};
pub use classifier::{ComplexityClassifier, EscalationTrigger};
pub use executor::{QueryFailure, QueryOutcome, QueryResult, TierExecutor};
pub use orchestrator::{Answer, AnswerStatus, FALLBACK_MESSAGE, Orchestrator, Query};
pub use tier::{ModelTier, PromptTemplate, TierRegistry};

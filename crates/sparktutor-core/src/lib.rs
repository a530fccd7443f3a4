// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the SparkTutor answer engine.
//!
//! Holds the types every other crate agrees on: the error enum, tier keys,
//! the single-turn chat request/response pair, and the [`ChatProvider`]
//! trait the upstream adapters implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TutorError;
pub use traits::ChatProvider;
pub use types::{ChatCompletion, ChatRequest, HealthStatus, TierKey, TokenUsage};

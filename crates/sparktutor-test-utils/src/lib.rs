// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for SparkTutor integration tests.
//!
//! - [`MockProvider`] - scriptable chat provider that records requests
//! - [`TestHarness`] - orchestrator and intake assembled over a mock provider

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::{DEFAULT_REPLY, MockProvider, MockReply};

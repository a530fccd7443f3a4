// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits implemented by adapter crates.

pub mod provider;

pub use provider::ChatProvider;

// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the SparkTutor answer engine.
//!
//! TOML parsing with `deny_unknown_fields`, XDG file lookup, `SPARKTUTOR_`
//! environment overrides, semantic validation, and miette diagnostics with
//! typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use sparktutor_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("paid tier model: {}", config.tiers.paid.model);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TutorConfig;

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<TutorConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from one explicit file and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<TutorConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from an inline TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TutorConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<TutorConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TutorConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                free = config.tiers.free.model,
                paid = config.tiers.paid.model,
                reason = config.tiers.reason.model,
                cache = config.cache.enabled,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read the TOML files of the standard hierarchy for span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_sources(None)
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}

// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./sparktutor.toml` > `~/.config/sparktutor/sparktutor.toml` >
//! `/etc/sparktutor/sparktutor.toml`, with `SPARKTUTOR_` environment overrides
//! on top of everything.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TutorConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sparktutor/sparktutor.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sparktutor.toml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SPARKTUTOR_";

/// Config sections reachable from environment variables.
const ENV_SECTIONS: &[&str] = &["agent", "upstream", "routing", "cache", "intake"];

/// Path of the per-user configuration file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sparktutor").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. [`SYSTEM_CONFIG_PATH`]
/// 3. [`user_config_path`]
/// 4. `./sparktutor.toml`
/// 5. `SPARKTUTOR_*` environment variables
pub fn load_config() -> Result<TutorConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TutorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file plus env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TutorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutorConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(TutorConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Config files that exist and take part in the merge, lowest priority first.
///
/// With an explicit path only that file is considered, matching
/// [`load_config_from_path`].
pub fn config_sources(explicit: Option<&Path>) -> Vec<PathBuf> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => {
            let mut candidates = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
            candidates.extend(user_config_path());
            candidates.push(
                std::env::current_dir()
                    .map(|d| d.join(LOCAL_CONFIG_FILE))
                    .unwrap_or_else(|_| LOCAL_CONFIG_FILE.into()),
            );
            candidates
        }
    };
    candidates.into_iter().filter(|path| path.is_file()).collect()
}

/// Environment provider mapping `SPARKTUTOR_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after the section name becomes a dot, so
/// `SPARKTUTOR_UPSTREAM_API_KEY` lands on `upstream.api_key`. Tier sections
/// are nested and configured through TOML only. Figment hands `map` the key
/// in its original case, so it is lowercased before matching.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
        {
            return format!("{section}.{field}");
        }
    }
    key.to_string()
}

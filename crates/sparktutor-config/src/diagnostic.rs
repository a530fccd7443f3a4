// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config errors as miette diagnostics.
//!
//! Figment extraction errors are translated into [`ConfigError`] values that
//! point at the offending key in its TOML source and, for unknown keys,
//! suggest the closest valid key.

#![allow(unused_assignments)] // miette's Diagnostic derive trips this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler similarity a valid key must exceed to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem found while loading or validating.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no config struct declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(sparktutor::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, if any is close enough.
        suggestion: Option<String>,
        /// Comma-separated keys accepted in this section.
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(sparktutor::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(sparktutor::config::missing_key),
        help("add `{key} = <value>` to sparktutor.toml")
    )]
    MissingKey { key: String },

    /// A semantically invalid value.
    #[error("validation error: {message}")]
    #[diagnostic(code(sparktutor::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no dedicated variant.
    #[error("configuration error: {0}")]
    #[diagnostic(code(sparktutor::config::other))]
    Other(String),
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation {
            message: message.into(),
        }
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Translate every error carried by a `figment::Error`.
///
/// `toml_sources` are `(path, content)` pairs used to attach source spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: qualified_key(&error.path, field),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn qualified_key(path: &[String], field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", path.join("."))
    }
}

fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(figment::Source::File(file)) = error.metadata.as_ref().and_then(|m| m.source.as_ref())
    else {
        return (None, None);
    };
    let file = file.display().to_string();
    let Some((path, content)) = toml_sources.iter().find(|(p, _)| *p == file) else {
        return (None, None);
    };

    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` at the start of a line inside the table `path`.
///
/// `path = ["tiers", "paid"]` searches after the `[tiers.paid]` header; an
/// empty path searches from the top of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = if path.is_empty() {
        0
    } else {
        let header = format!("[{}]", path.join("."));
        content.find(&header)? + header.len()
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && offset != start {
            // Next table; the key is not in this section.
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(field)
            && after.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Best valid key above the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_key() {
        let valid = &["complexity_threshold", "technical_terms", "fallback_message"];
        assert_eq!(
            suggest_key("technical_term", valid),
            Some("technical_terms".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_noise() {
        let valid = &["enabled", "max_entries"];
        assert_eq!(suggest_key("qqqqqq", valid), None);
    }

    #[test]
    fn key_offset_in_nested_table() {
        let content = "[tiers.free]\nmodel = \"a\"\n\n[tiers.paid]\nmodle = \"b\"\n";
        let path = vec!["tiers".to_string(), "paid".to_string()];
        let offset = find_key_offset(content, &path, "modle").expect("should find key");
        assert_eq!(&content[offset..offset + 5], "modle");
    }

    #[test]
    fn key_offset_stops_at_next_table() {
        let content = "[cache]\nenabled = true\n[intake]\nmax_entries = 3\n";
        let path = vec!["cache".to_string()];
        assert_eq!(find_key_offset(content, &path, "max_entries"), None);
    }

    #[test]
    fn missing_key_is_qualified() {
        assert_eq!(
            qualified_key(&["tiers".into(), "free".into()], "model"),
            "tiers.free.model"
        );
        assert_eq!(qualified_key(&[], "agent"), "agent");
    }
}

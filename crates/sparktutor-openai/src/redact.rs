// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for upstream error text before it reaches logs.

use std::sync::LazyLock;

use regex::Regex;

static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // OpenRouter keys: sk-or-v1-...
        r"sk-or-[a-zA-Z0-9_\-]{20,}",
        // OpenAI keys, including project keys: sk-proj-...
        r"sk-[a-zA-Z0-9_\-]{20,}",
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
    ]
    .into_iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

const REDACTED: &str = "[REDACTED]";

/// Replace known key formats and the given literal secrets with `[REDACTED]`.
pub fn redact(input: &str, secrets: &[&str]) -> String {
    let mut out = input.to_string();
    for pattern in SECRET_PATTERNS.iter() {
        out = pattern.replace_all(&out, REDACTED).into_owned();
    }
    for secret in secrets.iter().filter(|s| !s.is_empty()) {
        out = out.replace(secret, REDACTED);
    }
    out
}

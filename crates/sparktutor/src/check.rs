// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sparktutor check` command implementation.
//!
//! Runs quick diagnostics: configuration, tier registry, API key, and
//! provider health. Exits non-zero when any check fails.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use colored::Colorize;
use sparktutor_config::model::TutorConfig;
use sparktutor_core::{ChatProvider, HealthStatus, TutorError};
use sparktutor_openai::OpenAiProvider;
use sparktutor_router::TierRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// `sources` are the config files that were merged, lowest priority first.
pub async fn run_check(
    config: &TutorConfig,
    sources: &[PathBuf],
    plain: bool,
) -> Result<(), TutorError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![check_config(sources), check_tiers(config)];
    match OpenAiProvider::new(&config.upstream) {
        Ok(provider) => {
            results.push(pass("api key", "resolved".into(), Duration::ZERO));
            results.push(check_health(&provider).await);
        }
        Err(e) => results.push(fail("api key", e.to_string(), Duration::ZERO)),
    }

    println!();
    println!("  sparktutor check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render(result, use_color));
    }
    println!();

    let failed = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
    if failed > 0 {
        return Err(TutorError::Config(format!("{failed} check(s) failed")));
    }
    Ok(())
}

fn check_config(sources: &[PathBuf]) -> CheckResult {
    if sources.is_empty() {
        return CheckResult {
            name: "config",
            status: CheckStatus::Warn,
            message: "no config file found, using defaults".into(),
            duration: Duration::ZERO,
        };
    }
    let files: Vec<String> = sources.iter().map(|p| p.display().to_string()).collect();
    pass("config", files.join(", "), Duration::ZERO)
}

fn check_tiers(config: &TutorConfig) -> CheckResult {
    let start = Instant::now();
    match TierRegistry::from_config(&config.tiers) {
        Ok(registry) => {
            let models: Vec<&str> = registry.iter().map(|t| t.identifier.as_str()).collect();
            pass("tiers", models.join(", "), start.elapsed())
        }
        Err(e) => fail("tiers", e.to_string(), start.elapsed()),
    }
}

async fn check_health(provider: &dyn ChatProvider) -> CheckResult {
    let start = Instant::now();
    let name = "provider";
    match provider.health_check().await {
        Ok(HealthStatus::Healthy) => pass(name, format!("{} healthy", provider.name()), start.elapsed()),
        Ok(HealthStatus::Degraded(reason)) => CheckResult {
            name,
            status: CheckStatus::Warn,
            message: format!("{} degraded: {reason}", provider.name()),
            duration: start.elapsed(),
        },
        Ok(HealthStatus::Unhealthy(reason)) => fail(
            name,
            format!("{} unhealthy: {reason}", provider.name()),
            start.elapsed(),
        ),
        Err(e) => fail(name, e.to_string(), start.elapsed()),
    }
}

fn pass(name: &'static str, message: String, duration: Duration) -> CheckResult {
    CheckResult {
        name,
        status: CheckStatus::Pass,
        message,
        duration,
    }
}

fn fail(name: &'static str, message: String, duration: Duration) -> CheckResult {
    CheckResult {
        name,
        status: CheckStatus::Fail,
        message,
        duration,
    }
}

fn render(result: &CheckResult, use_color: bool) -> String {
    let ms = result.duration.as_millis();
    let (symbol, message) = match (result.status, use_color) {
        (CheckStatus::Pass, true) => ("✓".green().to_string(), result.message.clone()),
        (CheckStatus::Warn, true) => ("!".yellow().to_string(), result.message.yellow().to_string()),
        (CheckStatus::Fail, true) => ("✗".red().to_string(), result.message.red().to_string()),
        (CheckStatus::Pass, false) => ("[OK]  ".to_string(), result.message.clone()),
        (CheckStatus::Warn, false) => ("[WARN]".to_string(), result.message.clone()),
        (CheckStatus::Fail, false) => ("[FAIL]".to_string(), result.message.clone()),
    };
    format!("    {symbol} {:<10} {message} ({ms}ms)", result.name)
}

// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SparkTutor - a tiered educational answer engine.
//!
//! This is the binary entry point. Answers go to stdout; logs and
//! diagnostics go to stderr.

mod check;
mod shell;
mod tiers;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use sparktutor_config::model::TutorConfig;
use sparktutor_core::{ChatProvider, TutorError};
use sparktutor_intake::{Intake, Prepared};
use sparktutor_openai::OpenAiProvider;
use sparktutor_router::Orchestrator;
use tracing::info;

/// SparkTutor - a tiered educational answer engine.
#[derive(Parser, Debug)]
#[command(name = "sparktutor", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one question and exit.
    Ask {
        question: String,
        /// The answer shown before this question, if any.
        #[arg(long, value_name = "TEXT", default_value = "")]
        previous: String,
    },
    /// Launch an interactive question session.
    Shell,
    /// Print the resolved model tiers.
    Tiers,
    /// Validate configuration and check the upstream provider.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sparktutor_config::load_and_validate_path(path),
        None => sparktutor_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sparktutor_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);
    info!(agent = %config.agent.name, "configuration loaded");

    let result = match cli.command {
        Commands::Ask { question, previous } => run_ask(&config, &question, &previous).await,
        Commands::Shell => match build_pipeline(&config) {
            Ok((orchestrator, intake)) => shell::run_shell(orchestrator, intake).await,
            Err(e) => Err(e),
        },
        Commands::Tiers => tiers::print_tiers(&config),
        Commands::Check { plain } => {
            let sources = sparktutor_config::loader::config_sources(cli.config.as_deref());
            check::run_check(&config, &sources, plain).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run_ask(config: &TutorConfig, question: &str, previous: &str) -> Result<(), TutorError> {
    let (orchestrator, intake) = build_pipeline(config)?;
    let reply = match intake.prepare(question) {
        Prepared::Rejected { reply } => reply,
        Prepared::Accepted { question } => orchestrator.get_response(&question, previous).await,
    };
    println!("{reply}");
    Ok(())
}

/// Builds the provider, orchestrator, and intake gate from configuration.
fn build_pipeline(config: &TutorConfig) -> Result<(Arc<Orchestrator>, Intake), TutorError> {
    let provider: Arc<dyn ChatProvider> = Arc::new(OpenAiProvider::new(&config.upstream)?);
    let orchestrator = Orchestrator::from_config(config, provider)?;
    Ok((Arc::new(orchestrator), Intake::new(config.intake.clone())))
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over
/// `agent.log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sparktutor={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_ask_with_previous() {
        let cli = Cli::try_parse_from([
            "sparktutor",
            "ask",
            "What is 2+2?",
            "--previous",
            "incomplete answer",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask { question, previous } => {
                assert_eq!(question, "What is 2+2?");
                assert_eq!(previous, "incomplete answer");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_previous_defaults_to_empty() {
        let cli = Cli::try_parse_from(["sparktutor", "ask", "hi"]).unwrap();
        assert!(matches!(cli.command, Commands::Ask { ref previous, .. } if previous.is_empty()));
    }

    #[test]
    fn cli_config_flag_is_global() {
        let cli = Cli::try_parse_from(["sparktutor", "tiers", "--config", "/tmp/x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
        assert!(matches!(cli.command, Commands::Tiers));
    }

    #[test]
    fn cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["sparktutor"]).is_err());
    }

    #[test]
    fn pipeline_needs_an_api_key() {
        let mut config = TutorConfig::default();
        config.upstream.api_key = None;
        config.upstream.api_key_env = "SPARKTUTOR_TEST_SURELY_UNSET_KEY".into();
        assert!(matches!(build_pipeline(&config), Err(TutorError::Config(_))));
    }

    #[test]
    fn pipeline_builds_with_inline_key() {
        let mut config = TutorConfig::default();
        config.upstream.api_key = Some("sk-test".into());
        assert!(build_pipeline(&config).is_ok());
    }
}

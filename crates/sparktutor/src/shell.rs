// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sparktutor shell` command implementation.
//!
//! Interactive REPL with readline history. The last answer is passed back
//! as the previous response, so replying "explain better" escalates the
//! next question to the paid tier.

use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sparktutor_core::TutorError;
use sparktutor_intake::{Intake, Prepared};
use sparktutor_router::Orchestrator;
use tracing::debug;

/// What the REPL should do with one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellAction {
    Quit,
    /// Forget the previous answer.
    Reset,
    Skip,
    Ask(String),
}

fn parse_line(line: &str) -> ShellAction {
    match line.trim() {
        "/quit" | "/exit" => ShellAction::Quit,
        "/new" => ShellAction::Reset,
        "" => ShellAction::Skip,
        question => ShellAction::Ask(question.to_string()),
    }
}

/// Conversation state carried between turns.
struct ShellSession {
    orchestrator: Arc<Orchestrator>,
    intake: Intake,
    previous_response: String,
}

impl ShellSession {
    fn new(orchestrator: Arc<Orchestrator>, intake: Intake) -> Self {
        Self {
            orchestrator,
            intake,
            previous_response: String::new(),
        }
    }

    /// Answers one message and remembers the reply for the next turn.
    /// Rejected messages do not replace the remembered answer.
    async fn ask(&mut self, message: &str) -> String {
        match self.intake.prepare(message) {
            Prepared::Rejected { reply } => reply,
            Prepared::Accepted { question } => {
                let answer = self
                    .orchestrator
                    .get_response(&question, &self.previous_response)
                    .await;
                self.previous_response = answer.clone();
                answer
            }
        }
    }

    fn reset(&mut self) {
        self.previous_response.clear();
    }
}

/// Runs the `sparktutor shell` REPL until `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_shell(orchestrator: Arc<Orchestrator>, intake: Intake) -> Result<(), TutorError> {
    let mut session = ShellSession::new(orchestrator, intake);

    let mut rl = DefaultEditor::new()
        .map_err(|e| TutorError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "sparktutor shell".bold().green());
    println!(
        "Type {} to start over, {} to exit.\n",
        "/new".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "sparktutor".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match parse_line(&line) {
                ShellAction::Quit => break,
                ShellAction::Skip => continue,
                ShellAction::Reset => {
                    session.reset();
                    println!("{}", "(new conversation)".dimmed());
                }
                ShellAction::Ask(question) => {
                    note_history(rl.add_history_entry(&line));
                    let answer = session.ask(&question).await;
                    println!("{answer}\n");
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    debug!("shell session ended");
    Ok(())
}

/// History is a convenience; a failure to record it never ends the session.
fn note_history(result: rustyline::Result<bool>) {
    if let Err(e) = result {
        debug!(error = %e, "failed to record history entry");
    }
}

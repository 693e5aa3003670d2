//! Interactive session
//!
//! Wraps the orchestrator and the journal. The REPL feeds every line to
//! `handle_line`; the one-shot `run` and `ask` subcommands call
//! `run_raw` / `run_ai` directly.

use crate::errors;
use crate::logging::{ErrorDetails, Journal, LogEntry, Mode};
use archsim_common::llm_client::CommandTranslator;
use archsim_common::{AiRunner, ArchsimError, Scenario, Translation};
use std::time::Instant;

pub const HELP: &str = "\
Commands:
  pacman -Qq | -S <pkg> | -R <pkg> | -Syu
  paru -Qq | -S <pkg> | -R <pkg>
  systemctl --user status <svc> | restart <svc>
  ip link
  launch <pkg>

Session:
  ai <request>        translate a request and run it (safety-checked)
  scenario <name>     inject a fault: audio, pacman, network
  state               show the simulated system state
  help                show this help
  exit | quit         leave";

/// What the REPL should do with a line
#[derive(Debug)]
pub enum Reply {
    /// Blank line
    Nothing,
    Exit,
    /// Plain text to print
    Output(String),
    /// Result of an AI request
    Translated(Translation),
    /// AI request aborted by the safety gate or the LLM
    Rejected(ArchsimError),
    /// Malformed session command
    Usage(String),
}

pub struct Session<T: CommandTranslator> {
    runner: AiRunner<T>,
    journal: Journal,
}

impl<T: CommandTranslator> Session<T> {
    pub fn new(runner: AiRunner<T>, journal: Journal) -> Self {
        Self { runner, journal }
    }

    pub fn runner(&self) -> &AiRunner<T> {
        &self.runner
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Execute an operator command. No safety gate.
    pub fn run_raw(&mut self, line: &str) -> String {
        let started = Instant::now();
        let output = self.runner.simulator_mut().run(line);

        let mut entry = LogEntry::new(Mode::Raw, line);
        entry.command = Some(line.trim().to_string());
        entry.duration_ms = started.elapsed().as_millis() as u64;
        self.journal.record(&entry);

        output
    }

    /// Translate and execute a natural-language request.
    pub fn run_ai(&mut self, text: &str) -> Result<Translation, ArchsimError> {
        let started = Instant::now();
        let result = self.runner.run(text);

        let mut entry = LogEntry::new(Mode::Ai, text);
        entry.duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(translation) => {
                entry.command = Some(translation.command.clone());
                entry.allowed = Some(true);
            }
            Err(e) => {
                entry.ok = false;
                // LLM failures never reach the safety gate
                entry.allowed = match e {
                    ArchsimError::Safety(_) => Some(false),
                    ArchsimError::Llm(_) => None,
                };
                entry.exit_code = errors::exit_code_for(e);
                entry.error = Some(ErrorDetails {
                    code: e.code().to_string(),
                    message: e.to_string(),
                });
            }
        }
        self.journal.record(&entry);

        result
    }

    pub fn inject(&mut self, scenario: Scenario) {
        self.runner.simulator_mut().inject(scenario);
    }

    pub fn state_json(&self) -> String {
        serde_json::to_string_pretty(self.runner.simulator().state())
            .unwrap_or_else(|e| format!("failed to render state: {}", e))
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Nothing;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "exit" | "quit" if rest.is_empty() => Reply::Exit,
            "help" if rest.is_empty() => Reply::Output(HELP.to_string()),
            "state" if rest.is_empty() => Reply::Output(self.state_json()),
            "ai" => {
                if rest.is_empty() {
                    return Reply::Usage("usage: ai <request>".to_string());
                }
                match self.run_ai(rest) {
                    Ok(translation) => Reply::Translated(translation),
                    Err(e) => Reply::Rejected(e),
                }
            }
            "scenario" => match rest.parse::<Scenario>() {
                Ok(scenario) => {
                    self.inject(scenario);
                    Reply::Output(format!("scenario '{}' injected", scenario))
                }
                Err(e) => Reply::Usage(e.to_string()),
            },
            _ => Reply::Output(self.run_raw(line)),
        }
    }
}

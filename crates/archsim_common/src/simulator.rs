//! Dispatcher - routes a command line to its handler
//!
//! The simulator owns the session's `SystemState`. Raw operator input goes
//! straight through `run`; AI-originated input is validated by the
//! orchestrator before it reaches this point.

use crate::command::Command;
use crate::handlers::{ip, pacman, paru, systemctl};
use crate::scenarios::Scenario;
use crate::state::SystemState;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Simulator {
    state: SystemState,
}

impl Simulator {
    pub fn new(state: SystemState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SystemState {
        &mut self.state
    }

    pub fn inject(&mut self, scenario: Scenario) {
        scenario.apply(&mut self.state);
    }

    /// Parse and execute one command line. Never fails.
    pub fn run(&mut self, input: &str) -> String {
        let command = Command::parse(input);
        debug!(?command, "dispatch");
        self.execute(&command)
    }

    pub fn execute(&mut self, command: &Command) -> String {
        match command {
            Command::Pacman(op) => pacman::handle(op, &mut self.state),
            Command::Paru(op) => paru::handle(op, &mut self.state),
            Command::Systemctl(op) => systemctl::handle(op, &mut self.state),
            Command::Ip(op) => ip::handle(op, &self.state),
            Command::Launch(pkg) => {
                if self.state.is_installed(pkg) {
                    format!("launching {}", pkg)
                } else {
                    format!("{}: not installed", pkg)
                }
            }
            Command::Unknown(raw) => format!("{}: command not found", raw),
        }
    }
}

//! Command orchestrator - the AI path
//!
//! Owns the simulator (and through it the session state) plus the injected
//! LLM translator. Each utterance becomes at most a short sequence of
//! validated commands; every step is validated before it is dispatched.

use crate::command::Command;
use crate::error::ArchsimError;
use crate::intent;
use crate::llm_client::CommandTranslator;
use crate::safety;
use crate::simulator::Simulator;
use crate::NOOP;
use tracing::{debug, info};

/// Command of record plus the output it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub command: String,
    pub output: String,
}

impl Translation {
    pub fn noop() -> Self {
        Self {
            command: NOOP.to_string(),
            output: String::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.command == NOOP
    }
}

pub struct AiRunner<T: CommandTranslator> {
    sim: Simulator,
    translator: T,
}

impl<T: CommandTranslator> AiRunner<T> {
    pub fn new(sim: Simulator, translator: T) -> Self {
        Self { sim, translator }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    /// Raw operator commands and scenario injection go through here.
    pub fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.sim
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Translate and execute one utterance.
    pub fn run(&mut self, input: &str) -> Result<Translation, ArchsimError> {
        if let Some(pkg) = intent::launch_target(input) {
            return self.open(pkg);
        }

        let command = intent::translate(input, self.sim.state(), &self.translator)?;
        if command == NOOP {
            debug!(input, "nothing to do");
            return Ok(Translation::noop());
        }

        let output = self.execute_validated(&command)?;
        Ok(Translation { command, output })
    }

    /// Install if needed, then launch.
    fn open(&mut self, pkg: &str) -> Result<Translation, ArchsimError> {
        if pkg.is_empty() {
            return Ok(Translation::noop());
        }

        let mut outputs = Vec::new();

        if !self.sim.state().is_installed(pkg) {
            let install = Command::install(pkg).to_string();
            info!(package = pkg, "not installed, installing before launch");
            outputs.push(self.execute_validated(&install)?);
        }

        let launch = Command::launch(pkg).to_string();
        outputs.push(self.execute_validated(&launch)?);

        let output = outputs
            .into_iter()
            .filter(|out| !out.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Translation {
            command: launch,
            output,
        })
    }

    fn execute_validated(&mut self, command: &str) -> Result<String, ArchsimError> {
        safety::validate(command)?;
        debug!(command, "executing validated command");
        Ok(self.sim.run(command))
    }
}

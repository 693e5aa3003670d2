//! Archsim Common - simulated Arch shell core
//!
//! In-memory package/service/network state, the typed command model and its
//! handlers, the safety gate for AI-originated commands, and the intent
//! translator + orchestrator that drive the natural-language path.

pub mod command;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod llm_client;
pub mod orchestrator;
pub mod safety;
pub mod scenarios;
pub mod simulator;
pub mod state;

pub use command::Command;
pub use config::ArchsimConfig;
pub use error::ArchsimError;
pub use llm_client::{CommandTranslator, FakeLlmClient, LlmConfig, LlmError, OpenAiTranslator};
pub use orchestrator::{AiRunner, Translation};
pub use safety::{validate, SafetyError};
pub use scenarios::Scenario;
pub use simulator::Simulator;
pub use state::SystemState;

/// Literal token meaning "nothing to do".
pub const NOOP: &str = "true";

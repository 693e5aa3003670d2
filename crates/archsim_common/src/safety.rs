//! Safety gate for AI-originated commands
//!
//! Every command produced by the translator or orchestrator passes through
//! `validate` before it reaches the simulator. Commands typed by the
//! operator bypass it.
//!
//! Two checks, both always enforced:
//! 1. Denylist - no destructive utilities, shell metacharacters or escapes
//! 2. Allowlist - must start with a simulated tool prefix or the no-op token

use thiserror::Error;
use tracing::warn;

/// Substrings that are never allowed anywhere in a command.
pub const FORBIDDEN_PATTERNS: &[&str] = &[
    // Destructive utilities
    "rm ", "dd ", "mkfs",
    // Shell metacharacters
    ":", "|", ">", "<", "&&", "||",
    // Downloads and shell escapes
    "curl", "wget", "bash", "sh",
];

/// Accepted command prefixes.
pub const ALLOWED_PREFIXES: &[&str] = &["pacman ", "paru ", "systemctl ", "ip ", "launch ", crate::NOOP];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafetyError {
    #[error("Blocked unsafe command: {command} (matched '{pattern}')")]
    UnsafeCommand { command: String, pattern: &'static str },

    #[error("Command not allowed: {command}")]
    DisallowedCommand { command: String },
}

impl SafetyError {
    pub fn command(&self) -> &str {
        match self {
            SafetyError::UnsafeCommand { command, .. } => command,
            SafetyError::DisallowedCommand { command } => command,
        }
    }
}

/// First forbidden pattern found in `command`, if any.
pub fn find_forbidden(command: &str) -> Option<&'static str> {
    FORBIDDEN_PATTERNS
        .iter()
        .copied()
        .find(|pattern| command.contains(pattern))
}

pub fn is_allowed_prefix(command: &str) -> bool {
    ALLOWED_PREFIXES.iter().any(|prefix| command.starts_with(prefix))
}

/// Validate a command before execution.
pub fn validate(command: &str) -> Result<(), SafetyError> {
    if let Some(pattern) = find_forbidden(command) {
        warn!(command, pattern, "rejected unsafe command");
        return Err(SafetyError::UnsafeCommand {
            command: command.to_string(),
            pattern,
        });
    }

    if !is_allowed_prefix(command) {
        warn!(command, "rejected command outside allowlist");
        return Err(SafetyError::DisallowedCommand {
            command: command.to_string(),
        });
    }

    Ok(())
}

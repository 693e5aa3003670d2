//! Error types for the AI path.

use crate::llm_client::LlmError;
use crate::safety::SafetyError;
use thiserror::Error;

/// Failures that abort an orchestrated step. Simulated command failures are
/// plain output and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchsimError {
    #[error(transparent)]
    Safety(#[from] SafetyError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl ArchsimError {
    pub fn code(&self) -> &'static str {
        match self {
            ArchsimError::Safety(SafetyError::UnsafeCommand { .. }) => "unsafe_command",
            ArchsimError::Safety(SafetyError::DisallowedCommand { .. }) => "disallowed_command",
            ArchsimError::Llm(LlmError::NotConfigured(_)) | ArchsimError::Llm(LlmError::Disabled) => {
                "llm_not_configured"
            }
            ArchsimError::Llm(_) => "llm_error",
        }
    }

    pub fn is_safety(&self) -> bool {
        matches!(self, ArchsimError::Safety(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ArchsimError::Llm(LlmError::NotConfigured(_)) | ArchsimError::Llm(LlmError::Disabled)
        )
    }
}

//! Exit codes for archsimctl

use archsim_common::llm_client::LlmError;
use archsim_common::ArchsimError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the safety gate rejected a translated command
pub const EXIT_UNSAFE_COMMAND: i32 = 65;

/// Exit code when the LLM was reachable in principle but the call failed
pub const EXIT_LLM_UNAVAILABLE: i32 = 69;

/// Exit code when the LLM is disabled or has no usable credential
pub const EXIT_CONFIG_ERROR: i32 = 78;

pub fn exit_code_for(error: &ArchsimError) -> i32 {
    match error {
        ArchsimError::Safety(_) => EXIT_UNSAFE_COMMAND,
        ArchsimError::Llm(LlmError::NotConfigured(_)) | ArchsimError::Llm(LlmError::Disabled) => {
            EXIT_CONFIG_ERROR
        }
        ArchsimError::Llm(_) => EXIT_LLM_UNAVAILABLE,
    }
}

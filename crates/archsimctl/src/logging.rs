//! Session journal for archsimctl
//!
//! One JSON line per executed input, appended to a JSONL file.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How the input reached the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Typed by the operator, no safety gate
    Raw,
    /// Translated from natural language
    Ai,
}

/// Log entry for each executed input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Request ID (UUID)
    pub req_id: String,

    pub mode: Mode,

    /// What the operator typed
    pub input: String,

    /// Command that ran (the no-op token when nothing ran)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Safety gate verdict; absent for raw input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<bool>,

    pub exit_code: i32,

    /// Duration in milliseconds
    pub duration_ms: u64,

    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(mode: Mode, input: &str) -> Self {
        Self {
            ts: Self::now(),
            req_id: Self::generate_req_id(),
            mode,
            input: input.to_string(),
            command: None,
            allowed: None,
            exit_code: crate::errors::EXIT_SUCCESS,
            duration_ms: 0,
            ok: true,
            error: None,
        }
    }

    /// Generate request ID
    pub fn generate_req_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get current timestamp in ISO 8601 format
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

/// Where journal entries go
#[derive(Debug, Clone, Default)]
pub struct Journal {
    path: Option<PathBuf>,
}

impl Journal {
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Use `explicit` if given, else discover a path from the environment.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        Self {
            path: explicit.or_else(Self::discover_log_path),
        }
    }

    /// Discover journal path with fallback chain
    ///
    /// Priority:
    /// 1. $ARCHSIM_LOG_FILE environment variable (explicit override)
    /// 2. $XDG_STATE_HOME/archsim/session.jsonl (XDG standard)
    /// 3. ~/.local/state/archsim/session.jsonl (XDG fallback)
    fn discover_log_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ARCHSIM_LOG_FILE") {
            return Some(PathBuf::from(path));
        }

        if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
            return Some(PathBuf::from(xdg_state).join("archsim/session.jsonl"));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".local/state/archsim/session.jsonl"));
        }

        None
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append an entry. Failures never interrupt the session.
    pub fn record(&self, entry: &LogEntry) {
        let Some(path) = &self.path else {
            return;
        };

        if let Err(e) = Self::write_to_file(entry, path) {
            tracing::debug!(path = %path.display(), "journal write failed: {}", e);
        }
    }

    fn write_to_file(entry: &LogEntry, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string(entry)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", json)?;
        Ok(())
    }
}

//! Error types for the harness
//!
//! Only conditions that stop a run are errors: an unresolvable or
//! unspawnable child, unreadable files, an opt-in timeout firing.
//! Assertion mismatches are not errors - the expectation engine records
//! them and the reporter prints them at the end of the run.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Child Process Errors ===
    #[error("Child program '{name}' not found in PATH")]
    ChildNotFound { name: String },

    #[error("No child program given. Pass one on the command line or set 'child.program' in replcheck.toml")]
    NoChildProgram,

    #[error("Failed to spawn child program '{program}': {source}")]
    SpawnFailed { program: String, source: io::Error },

    #[error("Child run timed out after {0} seconds")]
    RunTimeout(u64),

    // === Scenario Errors ===
    #[error("Invalid scenario file '{path}': {message}")]
    ScenarioParse { path: String, message: String },

    #[error("Capture has no line at index {index} (got {count} lines)")]
    LineOutOfRange { index: i64, count: usize },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a spawn failure error for a program path
    pub fn spawn_failed(program: &Path, source: io::Error) -> Self {
        Self::SpawnFailed {
            program: program.display().to_string(),
            source,
        }
    }

    /// Create a file read error
    pub fn file_read(path: &Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a scenario parse error
    pub fn scenario_parse(path: &Path, message: impl std::fmt::Display) -> Self {
        Self::ScenarioParse {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

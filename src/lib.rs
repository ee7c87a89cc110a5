//! Black-box behavioral test harness for line-oriented database REPLs
//!
//! Spawns a child program per script, feeds commands to its stdin, captures
//! stdout and stderr merged into one stream, and compares captures against
//! literal expected text. The built-in suite pins the child's observable
//! protocol; extra scenarios load from YAML files.

pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod suite;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{Driver, Expectations, Fixture, Reporter, RunSummary, ScriptRunner};
pub use suite::{RunOptions, Scenario};

//! Scenario model and execution
//!
//! A scenario is a name plus a way to produce one `{expected, actual}` pair
//! of capture texts. Built-in scenarios are plain function values; file
//! scenarios are data interpreted by the runner.

pub mod builtin;
pub mod config;
pub mod runner;

use futures_util::future::BoxFuture;

use crate::common::Result;
use crate::harness::ScriptRunner;

pub use config::{ScenarioFile, ScriptScenario};
pub use runner::{run, RunOptions};

/// What one scenario produced: the text it wanted and the text it got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub expected: String,
    pub actual: String,
}

/// A scenario body: borrows the runner, produces one outcome
pub type ScenarioFn = for<'a> fn(&'a dyn ScriptRunner) -> BoxFuture<'a, Result<Outcome>>;

/// One runnable scenario
pub struct Scenario {
    pub name: String,
    pub skip: bool,
    kind: Kind,
}

enum Kind {
    /// Compiled-in function value
    Builtin(ScenarioFn),
    /// Loaded from a scenario file
    Script(ScriptScenario),
}

impl Scenario {
    /// Wrap a compiled-in scenario function
    pub fn builtin(name: &str, body: ScenarioFn) -> Self {
        Self {
            name: name.to_string(),
            skip: false,
            kind: Kind::Builtin(body),
        }
    }

    /// Wrap a file-defined scenario
    pub fn from_script(script: ScriptScenario) -> Self {
        Self {
            name: script.name.clone(),
            skip: script.skip,
            kind: Kind::Script(script),
        }
    }

    /// Produce this scenario's outcome against `runner`
    pub async fn produce(&self, runner: &dyn ScriptRunner) -> Result<Outcome> {
        match &self.kind {
            Kind::Builtin(body) => body(runner).await,
            Kind::Script(script) => script.produce(runner).await,
        }
    }
}

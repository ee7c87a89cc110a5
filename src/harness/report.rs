//! Run reporting
//!
//! The summary is the surface scripts and humans read: two lines always, a
//! `Failures:` block only when something failed, expected and actual text
//! delimited with `END` so trailing whitespace differences are visible.

use std::time::Instant;

use serde::Serialize;

use super::expect::{Expectations, Failure};

/// Wall-clock timer for one run
#[derive(Debug)]
pub struct Reporter {
    started: Instant,
}

impl Reporter {
    /// Start timing a run
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Close the run, folding the engine state into a summary
    pub fn finish(self, checks: Expectations) -> RunSummary {
        let elapsed_secs = self.started.elapsed().as_secs_f64();
        let (examples, failures) = checks.into_parts();
        RunSummary {
            examples,
            failures,
            elapsed_secs,
        }
    }
}

/// Everything a finished run reports
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Completed (non-skipped) checks
    pub examples: usize,
    /// Mismatches in declaration order
    pub failures: Vec<Failure>,
    /// Wall-clock duration of the run
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// True when every check matched
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render the human-readable report
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Finished in {:.2} seconds\n", self.elapsed_secs));
        out.push_str(&format!(
            "{} examples, {} failures\n",
            self.examples,
            self.failures.len()
        ));

        if !self.failures.is_empty() {
            out.push_str("\nFailures:\n");
            for failure in &self.failures {
                out.push_str(&format!(
                    "\nTest name: {}\nExpected:\n{}END\n\nResult:\n{}END\n\n",
                    failure.name, failure.expected, failure.actual
                ));
            }
        }

        out
    }
}

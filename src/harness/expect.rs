//! Expectation engine
//!
//! A small stateful protocol: `declare` a test name, hand over a captured
//! result with `expect`, close the check with `eq`. Comparisons are exact
//! string equality; mismatches are recorded, never raised. `skip` mutes
//! the next check entirely.

use serde::Serialize;

/// One recorded mismatch
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Failure {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

/// Pass/fail state for one run
///
/// Tracks the number of completed checks and the mismatches among them, in
/// declaration order. Created per run and threaded through explicitly;
/// the crate keeps no global run state.
#[derive(Debug, Default)]
pub struct Expectations {
    examples: usize,
    failures: Vec<Failure>,
    pending_name: Option<String>,
    skip_next: bool,
}

impl Expectations {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the check that the next `eq` closes
    ///
    /// Declaring again before `eq` overwrites the previous name; the last
    /// declaration wins. Callers chaining several driver invocations under
    /// one name rely on this.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.pending_name = Some(name.into());
    }

    /// Mute the next `eq`: it will neither count nor record
    pub fn skip(&mut self) {
        self.skip_next = true;
    }

    /// Hand over a captured result, returning the handle that closes the check
    pub fn expect(&mut self, actual: impl Into<String>) -> Pending<'_> {
        Pending {
            engine: self,
            actual: actual.into(),
        }
    }

    /// Number of completed (non-skipped) checks
    pub fn examples(&self) -> usize {
        self.examples
    }

    /// Recorded mismatches in declaration order
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consume the engine, yielding the check count and the mismatches
    pub fn into_parts(self) -> (usize, Vec<Failure>) {
        (self.examples, self.failures)
    }
}

/// A captured result waiting for its expected value
///
/// Holds the only mutable borrow of the engine, so at most one pending
/// result can exist at a time.
#[must_use = "a pending result does nothing until eq() closes the check"]
pub struct Pending<'a> {
    engine: &'a mut Expectations,
    actual: String,
}

impl Pending<'_> {
    /// Close the check: exact comparison against `expected`
    pub fn eq(self, expected: impl Into<String>) {
        let engine = self.engine;
        if engine.skip_next {
            engine.skip_next = false;
            engine.pending_name = None;
            return;
        }

        engine.examples += 1;
        let expected = expected.into();
        if self.actual == expected {
            engine.pending_name = None;
        } else {
            engine.failures.push(Failure {
                name: engine.pending_name.take().unwrap_or_default(),
                expected,
                actual: self.actual,
            });
        }
    }
}

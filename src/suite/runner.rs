//! Suite execution
//!
//! Reduces a scenario list through the expectation engine: clean the
//! fixture, start the clock, produce each outcome in order, check it,
//! fold everything into one summary.

use colored::Colorize;

use crate::common::Result;
use crate::harness::{Expectations, Reporter, RunSummary, ScriptRunner};

use super::Scenario;

/// Knobs for one suite run
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Only run scenarios whose name contains this substring
    pub filter: Option<String>,
    /// Suppress per-scenario progress lines
    pub quiet: bool,
}

/// Run scenarios in order and return the summary
///
/// The fixture is cleaned once up front so stale state from an aborted
/// earlier run cannot leak in. A skipped scenario still executes, its
/// check is just muted; a filtered-out scenario does not execute at all.
/// Harness-level errors (spawn failure, timeout) abort the whole run.
pub async fn run(
    runner: &dyn ScriptRunner,
    scenarios: &[Scenario],
    options: &RunOptions,
) -> Result<RunSummary> {
    runner.clean();

    let reporter = Reporter::start();
    let mut checks = Expectations::new();

    for scenario in scenarios {
        if let Some(filter) = &options.filter {
            if !scenario.name.contains(filter.as_str()) {
                continue;
            }
        }

        tracing::debug!(name = %scenario.name, "running scenario");
        checks.declare(&scenario.name);
        let outcome = scenario.produce(runner).await?;

        if scenario.skip {
            checks.skip();
        }
        let failed_before = checks.failures().len();
        checks.expect(outcome.actual).eq(outcome.expected);

        if !options.quiet {
            print_progress(scenario, checks.failures().len() > failed_before);
        }
    }

    Ok(reporter.finish(checks))
}

fn print_progress(scenario: &Scenario, failed: bool) {
    if scenario.skip {
        println!("  {} {} (skipped)", "-".dimmed(), scenario.name.dimmed());
    } else if failed {
        println!("  {} {}", "✗".red(), scenario.name);
    } else {
        println!("  {} {}", "✓".green(), scenario.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::ScriptScenario;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    /// Runner answering every script with the same capture
    struct EchoRunner {
        reply: String,
        calls: Mutex<usize>,
        cleans: Mutex<usize>,
    }

    impl EchoRunner {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Mutex::new(0),
                cleans: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ScriptRunner for EchoRunner {
        async fn run_script(&self, _script: &str) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.reply.clone())
        }

        async fn run_persistent(&self, _script: &str) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.reply.clone())
        }

        fn clean(&self) {
            *self.cleans.lock().unwrap() += 1;
        }

        fn fixture_path(&self) -> &Path {
            Path::new("test.db")
        }
    }

    fn scenario(name: &str, expect: &str) -> Scenario {
        Scenario::from_script(ScriptScenario {
            name: name.to_string(),
            description: None,
            setup: None,
            script: "select\n.exit\n".to_string(),
            expect: expect.to_string(),
            persistent: false,
            skip: false,
            line: None,
        })
    }

    fn quiet() -> RunOptions {
        RunOptions {
            quiet: true,
            ..RunOptions::default()
        }
    }

    #[tokio::test]
    async fn test_run_reduces_all_scenarios() {
        let runner = EchoRunner::new("db > ok");
        let scenarios = vec![
            scenario("passes", "db > ok"),
            scenario("fails", "db > other"),
        ];

        let summary = run(&runner, &scenarios, &quiet()).await.unwrap();

        assert_eq!(summary.examples, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].name, "fails");
        assert_eq!(summary.failures[0].actual, "db > ok");
        assert_eq!(summary.failures[0].expected, "db > other");
    }

    #[tokio::test]
    async fn test_fixture_cleaned_before_anything_runs() {
        let runner = EchoRunner::new("db > ok");

        let summary = run(&runner, &[], &quiet()).await.unwrap();

        assert_eq!(summary.examples, 0);
        assert!(summary.passed());
        assert_eq!(*runner.cleans.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_filter_selects_by_substring() {
        let runner = EchoRunner::new("db > ok");
        let scenarios = vec![
            scenario("inserts and retrieves a row", "db > ok"),
            scenario("prints error message if id is negative", "db > no"),
        ];
        let options = RunOptions {
            filter: Some("retrieves".to_string()),
            quiet: true,
        };

        let summary = run(&runner, &scenarios, &options).await.unwrap();

        assert_eq!(summary.examples, 1);
        assert!(summary.passed());
        assert_eq!(*runner.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_skipped_scenario_runs_but_is_not_counted() {
        let runner = EchoRunner::new("db > ok");
        let mut skipped = scenario("stale expectation", "db > something else");
        skipped.skip = true;

        let summary = run(&runner, &[skipped], &quiet()).await.unwrap();

        assert_eq!(summary.examples, 0);
        assert!(summary.failures.is_empty());
        // The child process still ran; only the check was muted.
        assert_eq!(*runner.calls.lock().unwrap(), 1);
    }
}

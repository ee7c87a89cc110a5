//! Built-in compatibility suite
//!
//! The behavioral contract of the child program, written down as scripts
//! and literal expected captures: prompt text, row echo format, error
//! lines, storage limits, persistence across invocations.

use futures_util::future::BoxFuture;

use crate::common::Result;
use crate::harness::ScriptRunner;

use super::{Outcome, Scenario};

/// Longest username the child accepts
pub const USERNAME_MAX: usize = 32;

/// Longest email the child accepts
pub const EMAIL_MAX: usize = 255;

/// Rows that fit before the child runs out of leaf space
pub const LEAF_CAPACITY: usize = 1400;

/// The full built-in suite, in run order
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::builtin("inserts and retrieves a row", insert_and_select),
        Scenario::builtin("prints error message when table is full", table_full),
        Scenario::builtin("allow inserting maximum length strings", max_length_strings),
        Scenario::builtin("prints error message if strings are too long", string_too_long),
        Scenario::builtin("prints error message if id is negative", negative_id),
        Scenario::builtin("persistent data after process exit", persistence),
        Scenario::builtin("prints error message if id is duplicate", duplicate_id),
    ]
}

fn insert_and_select(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        let actual = runner
            .run_script("insert 1 user person@google.com\nselect\n.exit\n")
            .await?;
        Ok(Outcome {
            expected: "db > Executed.\ndb > (1, user, person@google.com)\nExecuted.\ndb > "
                .to_string(),
            actual,
        })
    })
}

fn table_full(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        let mut script = String::new();
        for i in 0..=LEAF_CAPACITY {
            script.push_str(&format!("insert {} user person@google.com\n", i));
        }
        script.push_str(".exit\n");

        let capture = runner.run_persistent(&script).await?;
        // Only the line before the final prompt matters: the last insert's
        // error. Everything above it is 1400 successful inserts.
        let actual = capture
            .split('\n')
            .rev()
            .nth(1)
            .unwrap_or_default()
            .to_string();
        runner.clean();

        Ok(Outcome {
            expected: "db > Need to implement splitting a leaf node.".to_string(),
            actual,
        })
    })
}

fn max_length_strings(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        let username = "a".repeat(USERNAME_MAX);
        let email = padded_email(EMAIL_MAX);
        let script = format!("insert 1 {} {}\nselect\n.exit\n", username, email);

        let actual = runner.run_script(&script).await?;
        Ok(Outcome {
            expected: format!(
                "db > Executed.\ndb > (1, {}, {})\nExecuted.\ndb > ",
                username, email
            ),
            actual,
        })
    })
}

fn string_too_long(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        let username = "a".repeat(USERNAME_MAX);
        let email = padded_email(EMAIL_MAX + 1);
        let script = format!("insert 1 {} {}\n.exit\n", username, email);

        let actual = runner.run_script(&script).await?;
        Ok(Outcome {
            expected: "db > Error: string is too long.\ndb > ".to_string(),
            actual,
        })
    })
}

fn negative_id(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        let actual = runner
            .run_script("insert -1 stack foo@google.com\n.exit\n")
            .await?;
        Ok(Outcome {
            expected: "db > Error: id must be positive.\ndb > ".to_string(),
            actual,
        })
    })
}

fn persistence(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        runner.clean();
        runner
            .run_persistent("insert 1 user person@google.com\n.exit\n")
            .await?;
        let actual = runner.run_persistent("select\n.exit\n").await?;
        runner.clean();

        Ok(Outcome {
            expected: "db > (1, user, person@google.com)\nExecuted.\ndb > ".to_string(),
            actual,
        })
    })
}

fn duplicate_id(runner: &dyn ScriptRunner) -> BoxFuture<'_, Result<Outcome>> {
    Box::pin(async move {
        let actual = runner
            .run_script(
                "insert 1 user person@example.com\ninsert 1 user person@example.com\nselect\n.exit\n",
            )
            .await?;
        Ok(Outcome {
            expected: "db > Executed.\ndb > Error: duplicate key.\ndb > (1, user, person@example.com)\nExecuted.\ndb > "
                .to_string(),
            actual,
        })
    })
}

/// An address padded with leading `b`s to exactly `len` bytes
fn padded_email(len: usize) -> String {
    let base = "person@google.com";
    format!("{}{}", "b".repeat(len - base.len()), base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::Mutex;

    /// Canned runner: replays queued captures, records every call
    struct FakeRunner {
        replies: Mutex<VecDeque<String>>,
        calls: Mutex<Vec<(String, bool)>>,
        cleans: Mutex<usize>,
    }

    impl FakeRunner {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
                calls: Mutex::new(Vec::new()),
                cleans: Mutex::new(0),
            }
        }

        fn answer(&self, script: &str, persistent: bool) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((script.to_string(), persistent));
            Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
        }
    }

    #[async_trait]
    impl ScriptRunner for FakeRunner {
        async fn run_script(&self, script: &str) -> Result<String> {
            self.answer(script, false)
        }

        async fn run_persistent(&self, script: &str) -> Result<String> {
            self.answer(script, true)
        }

        fn clean(&self) {
            *self.cleans.lock().unwrap() += 1;
        }

        fn fixture_path(&self) -> &Path {
            Path::new("test.db")
        }
    }

    #[test]
    fn test_suite_names_in_run_order() {
        let names: Vec<_> = scenarios().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "inserts and retrieves a row",
                "prints error message when table is full",
                "allow inserting maximum length strings",
                "prints error message if strings are too long",
                "prints error message if id is negative",
                "persistent data after process exit",
                "prints error message if id is duplicate",
            ]
        );
    }

    #[tokio::test]
    async fn test_round_trip_scenario_script_and_expectation() {
        let capture = "db > Executed.\ndb > (1, user, person@google.com)\nExecuted.\ndb > ";
        let fake = FakeRunner::new(&[capture]);

        let outcome = insert_and_select(&fake).await.unwrap();

        assert_eq!(outcome.actual, capture);
        assert_eq!(outcome.expected, capture);
        let calls = fake.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[(
                "insert 1 user person@google.com\nselect\n.exit\n".to_string(),
                false
            )]
        );
    }

    #[tokio::test]
    async fn test_table_full_compares_second_to_last_line() {
        let capture = "db > Executed.\ndb > Need to implement splitting a leaf node.\ndb > ";
        let fake = FakeRunner::new(&[capture]);

        let outcome = table_full(&fake).await.unwrap();

        assert_eq!(
            outcome.actual,
            "db > Need to implement splitting a leaf node."
        );
        assert_eq!(*fake.cleans.lock().unwrap(), 1);

        let calls = fake.calls.lock().unwrap();
        let (script, persistent) = &calls[0];
        assert!(*persistent);
        assert_eq!(script.lines().count(), LEAF_CAPACITY + 2);
        assert!(script.starts_with("insert 0 user person@google.com\n"));
        assert!(script.ends_with("insert 1400 user person@google.com\n.exit\n"));
    }

    #[tokio::test]
    async fn test_persistence_scenario_chains_two_runs() {
        let second = "db > (1, user, person@google.com)\nExecuted.\ndb > ";
        let fake = FakeRunner::new(&["db > Executed.\ndb > ", second]);

        let outcome = persistence(&fake).await.unwrap();

        assert_eq!(outcome.actual, second);
        assert_eq!(outcome.expected, second);
        assert_eq!(*fake.cleans.lock().unwrap(), 2);

        let calls = fake.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[
                (
                    "insert 1 user person@google.com\n.exit\n".to_string(),
                    true
                ),
                ("select\n.exit\n".to_string(), true),
            ]
        );
    }

    #[tokio::test]
    async fn test_length_scenarios_sit_on_the_boundary() {
        let fake = FakeRunner::new(&[""]);
        max_length_strings(&fake).await.unwrap();
        let script = fake.calls.lock().unwrap()[0].0.clone();
        let email = script
            .lines()
            .next()
            .unwrap()
            .split_whitespace()
            .nth(3)
            .unwrap()
            .to_string();
        assert_eq!(email.len(), EMAIL_MAX);

        let fake = FakeRunner::new(&[""]);
        string_too_long(&fake).await.unwrap();
        let script = fake.calls.lock().unwrap()[0].0.clone();
        let email = script
            .lines()
            .next()
            .unwrap()
            .split_whitespace()
            .nth(3)
            .unwrap()
            .to_string();
        assert_eq!(email.len(), EMAIL_MAX + 1);
    }

    #[test]
    fn test_padded_email_hits_exact_length() {
        assert_eq!(padded_email(EMAIL_MAX).len(), EMAIL_MAX);
        assert_eq!(padded_email(EMAIL_MAX + 1).len(), EMAIL_MAX + 1);
        assert!(padded_email(EMAIL_MAX).ends_with("person@google.com"));
    }
}

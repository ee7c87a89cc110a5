//! Scenario files
//!
//! YAML documents declaring extra black-box scenarios without recompiling:
//! a script to feed the child and the literal capture it must produce.
//! Quote scripts and expectations carefully - trailing prompt text like
//! `"db > "` ends in a space the comparison cares about.

use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};
use crate::harness::ScriptRunner;

use super::{Outcome, Scenario};

/// Top-level scenario file structure
#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub scenarios: Vec<ScriptScenario>,
}

/// One scenario declared as data
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptScenario {
    /// Name shown in progress lines and failure reports
    pub name: String,

    /// Free-form note, not interpreted
    #[serde(default)]
    pub description: Option<String>,

    /// Script run persistently before the main script, after a fixture
    /// clean. Seeds child state.
    #[serde(default)]
    pub setup: Option<String>,

    /// Lines fed to the child's stdin
    pub script: String,

    /// Literal text the capture must equal
    pub expect: String,

    /// Leave the fixture file in place after the run
    #[serde(default)]
    pub persistent: bool,

    /// Mute this scenario's check (the child still runs)
    #[serde(default)]
    pub skip: bool,

    /// Compare only this capture line (0-based; negative counts from the end)
    #[serde(default)]
    pub line: Option<i64>,
}

impl ScenarioFile {
    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        serde_yaml::from_str(&content).map_err(|e| Error::scenario_parse(path, e))
    }

    /// Turn the file's entries into runnable scenarios, in file order
    pub fn into_scenarios(self) -> Vec<Scenario> {
        self.scenarios.into_iter().map(Scenario::from_script).collect()
    }
}

impl ScriptScenario {
    /// Run this scenario's scripts and assemble its outcome
    pub(super) async fn produce(&self, runner: &dyn ScriptRunner) -> Result<Outcome> {
        if let Some(setup) = &self.setup {
            runner.clean();
            runner.run_persistent(setup).await?;
        }

        let capture = if self.persistent {
            runner.run_persistent(&self.script).await?
        } else {
            runner.run_script(&self.script).await?
        };

        let actual = match self.line {
            Some(index) => select_line(&capture, index)?.to_string(),
            None => capture,
        };

        Ok(Outcome {
            expected: self.expect.clone(),
            actual,
        })
    }
}

/// Pick one newline-split line out of a capture; negative counts from the end
fn select_line(capture: &str, index: i64) -> Result<&str> {
    let lines: Vec<&str> = capture.split('\n').collect();
    let resolved = if index < 0 {
        index + lines.len() as i64
    } else {
        index
    };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| lines.get(i).copied())
        .ok_or(Error::LineOutOfRange {
            index,
            count: lines.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_file_parses() {
        let file: ScenarioFile = serde_yaml::from_str(
            r#"
scenarios:
  - name: empty select
    script: "select\n.exit\n"
    expect: "db > Executed.\ndb > "
  - name: seeded select
    setup: "insert 1 user person@google.com\n.exit\n"
    script: "select\n.exit\n"
    expect: "db > (1, user, person@google.com)\nExecuted.\ndb > "
    persistent: true
"#,
        )
        .unwrap();

        assert_eq!(file.scenarios.len(), 2);
        assert_eq!(file.scenarios[0].name, "empty select");
        assert!(!file.scenarios[0].persistent);
        assert!(file.scenarios[1].persistent);
        assert!(file.scenarios[1].setup.is_some());
        // Double-quoted YAML keeps the trailing prompt space.
        assert!(file.scenarios[0].expect.ends_with("db > "));
    }

    #[test]
    fn test_defaults_are_off() {
        let scenario: ScriptScenario = serde_yaml::from_str(
            "name: n\nscript: \"select\\n\"\nexpect: \"db > \"",
        )
        .unwrap();

        assert!(!scenario.persistent);
        assert!(!scenario.skip);
        assert!(scenario.setup.is_none());
        assert!(scenario.line.is_none());
    }

    #[test]
    fn test_missing_expect_is_an_error() {
        let result: std::result::Result<ScriptScenario, _> =
            serde_yaml::from_str("name: n\nscript: \"select\\n\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_select_line_from_the_end() {
        let capture = "db > Executed.\ndb > Need to implement splitting a leaf node.\ndb > ";
        assert_eq!(
            select_line(capture, -2).unwrap(),
            "db > Need to implement splitting a leaf node."
        );
        assert_eq!(select_line(capture, -1).unwrap(), "db > ");
    }

    #[test]
    fn test_select_line_from_the_start() {
        assert_eq!(select_line("a\nb\nc", 0).unwrap(), "a");
        assert_eq!(select_line("a\nb\nc", 2).unwrap(), "c");
    }

    #[test]
    fn test_select_line_out_of_range() {
        assert!(matches!(
            select_line("a\nb", 5),
            Err(Error::LineOutOfRange { index: 5, count: 2 })
        ));
        assert!(matches!(
            select_line("a\nb", -3),
            Err(Error::LineOutOfRange { index: -3, count: 2 })
        ));
    }
}

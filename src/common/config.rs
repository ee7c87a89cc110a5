//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Child program settings
    #[serde(default)]
    pub child: ChildConfig,

    /// Fixture file settings
    #[serde(default)]
    pub fixture: FixtureConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Child program configuration
#[derive(Debug, Deserialize, Default)]
pub struct ChildConfig {
    /// Program to drive when none is given on the command line.
    /// A bare name is resolved through PATH, a path is used as-is.
    pub program: Option<String>,
}

/// Fixture file configuration
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    /// Path handed to the child as its storage file
    #[serde(default = "default_fixture_path")]
    pub path: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            path: default_fixture_path(),
        }
    }
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from("test.db")
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Default)]
pub struct Timeouts {
    /// Kill a child run after this many seconds.
    /// Unset means wait forever, the harness's default behavior.
    pub run_secs: Option<u64>,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist and parse. Otherwise the working
    /// directory file is tried, then the user configuration directory,
    /// then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local = paths::local_config_path();
        if local.exists() {
            return Self::from_file(&local);
        }

        if let Some(user) = paths::user_config_path() {
            if user.exists() {
                return Self::from_file(&user);
            }
        }

        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the child program to drive
    ///
    /// The command-line value wins over `child.program` from the file.
    pub fn resolve_program(&self, cli: Option<&Path>) -> Result<PathBuf> {
        let name = match cli {
            Some(p) => p.as_os_str().to_string_lossy().into_owned(),
            None => self.child.program.clone().ok_or(Error::NoChildProgram)?,
        };
        resolve_program_name(&name)
    }
}

/// Resolve a program name or path to an executable path
///
/// A value containing a path separator (or naming an existing file) is
/// used as-is; a bare name is searched in PATH.
pub fn resolve_program_name(name: &str) -> Result<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 || as_path.exists() {
        return Ok(as_path.to_path_buf());
    }
    which::which(name).map_err(|_| Error::ChildNotFound {
        name: name.to_string(),
    })
}

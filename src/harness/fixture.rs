//! Fixture file management
//!
//! The child program persists its data to a single on-disk file. Scenarios
//! checking persistence leave it in place between runs; everything else
//! starts from a clean slate.

use std::path::{Path, PathBuf};

/// The child program's persistent storage file
#[derive(Debug, Clone)]
pub struct Fixture {
    path: PathBuf,
}

impl Fixture {
    /// Create a fixture store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path handed to the child as its storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the fixture file if present
    ///
    /// Never fails the run: a missing file is already the desired end
    /// state, and a failed removal is logged and ignored.
    pub fn clean(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed fixture"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "could not remove fixture");
            }
        }
    }
}

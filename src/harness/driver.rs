//! Process driver
//!
//! Spawns the child program once per script, feeds the whole script to its
//! stdin, and captures stdout and stderr merged into one stream - the same
//! byte interleaving a shell `2>&1` would show. The child's exit status is
//! deliberately ignored: a crash just truncates the capture, and the
//! mismatch shows up in the report instead of aborting the run.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::common::{Error, Result};

use super::fixture::Fixture;

/// Runs one child invocation per script and yields the capture
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run a script, cleaning the fixture afterwards
    async fn run_script(&self, script: &str) -> Result<String>;

    /// Run a script, leaving the fixture in place for a later invocation
    async fn run_persistent(&self, script: &str) -> Result<String>;

    /// Remove the fixture file
    fn clean(&self);

    /// Path of the fixture file
    fn fixture_path(&self) -> &Path;
}

/// Spawning [`ScriptRunner`]: `[program, fixture]` argument vector, piped
/// stdin, merged output capture
#[derive(Debug, Clone)]
pub struct Driver {
    program: PathBuf,
    fixture: Fixture,
    timeout: Option<Duration>,
}

impl Driver {
    /// Create a driver for `program`, handing it `fixture` as its storage file
    pub fn new(program: impl Into<PathBuf>, fixture: Fixture) -> Self {
        Self {
            program: program.into(),
            fixture,
            timeout: None,
        }
    }

    /// Kill the child and fail the run if a script takes longer than this
    ///
    /// Off by default: a child that neither exits nor closes its output
    /// then blocks the run indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run_inner(&self, script: &str, persistent: bool) -> Result<String> {
        // One pipe whose write end serves as both stdout and stderr, so the
        // capture preserves the child's own write ordering.
        let (reader, writer) = std::io::pipe()?;
        let writer_clone = writer.try_clone()?;

        let mut cmd = Command::new(&self.program);
        cmd.arg(self.fixture.path())
            .stdin(Stdio::piped())
            .stdout(writer_clone)
            .stderr(writer);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::spawn_failed(&self.program, e))?;
        // The command still holds the parent's copies of the write end;
        // they must go away or the reader never sees EOF.
        drop(cmd);

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Internal("child stdin was not piped".to_string()))?;

        tracing::debug!(
            program = %self.program.display(),
            bytes = script.len(),
            persistent,
            "running script"
        );

        // Writer task: push the whole script, then close stdin to signal
        // end of input. A child that exits early breaks the pipe; whatever
        // it printed before that is its answer, not our failure.
        let script = script.to_string();
        let write_task = tokio::spawn(async move {
            if let Err(e) = stdin.write_all(script.as_bytes()).await {
                tracing::trace!(error = %e, "child stopped reading input");
            }
            let _ = stdin.shutdown().await;
        });

        // Reader task: drain the merged stream to EOF on a blocking thread.
        let read_task = tokio::task::spawn_blocking(move || {
            use std::io::Read;
            let mut reader = reader;
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });

        let capture = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, drain(&mut child, write_task, read_task))
                    .await
                {
                    Ok(capture) => capture,
                    Err(_) => {
                        let _ = child.start_kill();
                        let _ = child.wait().await;
                        if !persistent {
                            self.fixture.clean();
                        }
                        return Err(Error::RunTimeout(limit.as_secs()));
                    }
                }
            }
            None => drain(&mut child, write_task, read_task).await,
        }?;

        if !persistent {
            self.fixture.clean();
        }

        Ok(String::from_utf8_lossy(&capture).into_owned())
    }
}

/// Wait for the writer, then the reader's EOF, then reap the child
async fn drain(
    child: &mut Child,
    write_task: JoinHandle<()>,
    read_task: JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<Vec<u8>> {
    write_task
        .await
        .map_err(|e| Error::Internal(format!("writer task failed: {}", e)))?;
    let capture = read_task
        .await
        .map_err(|e| Error::Internal(format!("reader task failed: {}", e)))??;

    // Reap; the status itself is not part of the contract.
    let status = child.wait().await?;
    tracing::debug!(?status, bytes = capture.len(), "child finished");

    Ok(capture)
}

#[async_trait]
impl ScriptRunner for Driver {
    async fn run_script(&self, script: &str) -> Result<String> {
        self.run_inner(script, false).await
    }

    async fn run_persistent(&self, script: &str) -> Result<String> {
        self.run_inner(script, true).await
    }

    fn clean(&self) {
        self.fixture.clean();
    }

    fn fixture_path(&self) -> &Path {
        self.fixture.path()
    }
}

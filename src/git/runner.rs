//! Process execution for git commands
//!
//! Every git invocation in the crate goes through [`CommandRunner`], so the
//! pipelines can be exercised against a scripted runner in tests instead of
//! a real git binary and filesystem fixtures.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

const GIT_BINARY: &str = "git";

/// Errors produced while running git
#[derive(Debug, Error)]
pub enum GitError {
    /// The git process could not be started at all
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// The process did not exit within the configured limit
    #[error("git operation timed out after {secs} seconds")]
    TimedOut { secs: u64 },

    /// The process exited with a non-zero status
    #[error("`git {command}` failed: {message}")]
    Failed { command: String, message: String },
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Converts a non-zero exit into [`GitError::Failed`], returning stdout otherwise
    pub fn into_result(self, args: &[&str]) -> Result<String, GitError> {
        if self.success {
            Ok(self.stdout)
        } else {
            let message = if self.stderr.is_empty() {
                self.stdout
            } else {
                self.stderr
            };
            Err(GitError::Failed {
                command: args.join(" "),
                message: clean_error_message(&message),
            })
        }
    }
}

/// Capability to run `git <args>` inside a working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs git and returns its captured output; a non-zero exit is not an error here
    async fn run(&self, workdir: &Path, args: &[&str]) -> Result<CommandOutput, GitError>;

    /// Runs git and fails unless it exits successfully
    async fn run_checked(&self, workdir: &Path, args: &[&str]) -> Result<String, GitError> {
        self.run(workdir, args).await?.into_result(args)
    }
}

/// Runs the real `git` executable found on `PATH`
#[derive(Debug, Clone, Default)]
pub struct GitRunner {
    timeout: Option<Duration>,
}

impl GitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds every invocation; `None` waits for git indefinitely
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for GitRunner {
    async fn run(&self, workdir: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
        debug!(workdir = %workdir.display(), args = ?args, "running git");

        let mut command = Command::new(GIT_BINARY);
        command.args(args).current_dir(workdir).kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| GitError::TimedOut {
                    secs: limit.as_secs(),
                })??,
            None => command.output().await?,
        };

        let result = CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        if !result.success {
            debug!(args = ?args, stderr = %result.stderr, "git exited with failure");
        }

        Ok(result)
    }
}

/// Collapses whitespace in git's multi-line error output into one line
pub(crate) fn clean_error_message(error: &str) -> String {
    let cleaned = error.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        "unknown error".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted runner used by the unit tests of the pipelines

    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records every call and answers from a list of `(args prefix, output)` rules.
    /// Calls that match no rule succeed with empty output.
    #[derive(Default)]
    pub struct FakeRunner {
        rules: Mutex<Vec<(Vec<String>, CommandOutput)>>,
        calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes calls starting with `prefix` succeed with `stdout`
        pub fn succeed(self, prefix: &[&str], stdout: &str) -> Self {
            self.rule(prefix, true, stdout, "")
        }

        /// Makes calls starting with `prefix` exit non-zero with `stderr`
        pub fn fail(self, prefix: &[&str], stderr: &str) -> Self {
            self.rule(prefix, false, "", stderr)
        }

        fn rule(self, prefix: &[&str], success: bool, stdout: &str, stderr: &str) -> Self {
            self.rules.lock().unwrap().push((
                prefix.iter().map(|s| s.to_string()).collect(),
                CommandOutput {
                    success,
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
            ));
            self
        }

        pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }

        /// Just the argument lists, joined with spaces
        pub fn commands(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .map(|(_, args)| args.join(" "))
                .collect()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, workdir: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            self.calls
                .lock()
                .unwrap()
                .push((workdir.to_path_buf(), args.clone()));

            let rules = self.rules.lock().unwrap();
            let output = rules
                .iter()
                .find(|(prefix, _)| args.starts_with(prefix))
                .map(|(_, output)| output.clone())
                .unwrap_or(CommandOutput {
                    success: true,
                    ..CommandOutput::default()
                });
            Ok(output)
        }
    }
}

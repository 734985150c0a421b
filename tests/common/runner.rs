//! Runner wrapper that records git invocations

use async_trait::async_trait;
use monolize::git::{CommandOutput, CommandRunner, GitError, GitRunner};
use std::path::Path;
use std::sync::Mutex;

/// Delegates to the real git binary and remembers every argument list
#[derive(Default)]
pub struct RecordingRunner {
    inner: GitRunner,
    calls: Mutex<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, workdir: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
        self.calls.lock().unwrap().push(args.join(" "));
        self.inner.run(workdir, args).await
    }
}

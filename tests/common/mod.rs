//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;
pub mod runner;

pub use self::fixtures::Workspace;
pub use self::git::{configure_git_env, is_git_available, setup_git_repo};
pub use self::runner::RecordingRunner;

use std::sync::{Mutex, MutexGuard};
use std::sync::OnceLock;

static TEST_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquires a global lock for tests that modify process-wide state (like CWD)
pub fn lock_test() -> MutexGuard<'static, ()> {
    TEST_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

//! Monorepo assembly from git submodules
//!
//! A monorepo is recognized solely by a `.gitmodules` file at its root. Every
//! operation re-derives state by asking git; nothing is cached.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::GITMODULES_FILE_NAME;
use crate::git::{CommandRunner, GitError};

pub mod create;
pub mod status;
pub mod sync;

pub use create::CreateReport;
pub use status::{Submodule, SubmoduleState};
pub use sync::SyncReport;

#[derive(Debug, Error)]
pub enum MonorepoError {
    #[error("monorepo already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("not a monorepo (no .gitmodules found): {}", .0.display())]
    NotAMonorepo(PathBuf),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {step}: {source}")]
    Git {
        step: &'static str,
        #[source]
        source: GitError,
    },
}

impl MonorepoError {
    fn git(step: &'static str) -> impl FnOnce(GitError) -> Self {
        move |source| MonorepoError::Git { step, source }
    }
}

/// Checks if `path` holds a `.gitmodules` file
pub fn is_monorepo(path: &Path) -> bool {
    path.join(GITMODULES_FILE_NAME).is_file()
}

/// Handle on a monorepo directory and the runner used to drive git in it
pub struct Monorepo<'a, R: CommandRunner + ?Sized> {
    path: PathBuf,
    runner: &'a R,
    auto_commit: bool,
}

impl<'a, R: CommandRunner + ?Sized> Monorepo<'a, R> {
    pub fn new(path: impl Into<PathBuf>, runner: &'a R) -> Self {
        Self {
            path: path.into(),
            runner,
            auto_commit: true,
        }
    }

    /// Controls whether create and sync finish with a commit
    pub fn auto_commit(mut self, enabled: bool) -> Self {
        self.auto_commit = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fails when anything already exists at the monorepo path
    pub fn ensure_absent(&self) -> Result<(), MonorepoError> {
        // symlink_metadata so a dangling symlink also counts as existing
        if self.path.symlink_metadata().is_ok() {
            return Err(MonorepoError::AlreadyExists(self.path.clone()));
        }
        Ok(())
    }

    /// Fails unless the monorepo path carries the `.gitmodules` marker
    pub fn ensure_monorepo(&self) -> Result<(), MonorepoError> {
        if !is_monorepo(&self.path) {
            return Err(MonorepoError::NotAMonorepo(self.path.clone()));
        }
        Ok(())
    }
}

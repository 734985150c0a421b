//! Command handlers behind the CLI
//!
//! Each handler resolves its paths from [`Settings`](crate::core::Settings),
//! drives the library through a [`CommandRunner`](crate::git::CommandRunner)
//! and prints the user-facing report.

pub mod create;
pub mod status;
pub mod sync;
pub mod update;

pub use create::handle_create_command;
pub use status::handle_status_command;
pub use sync::handle_sync_command;
pub use update::handle_update_command;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Explicit monorepo argument, or the current directory
pub(crate) fn monorepo_path_or_cwd(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => crate::core::resolve_path(path)
            .with_context(|| format!("failed to resolve path: {}", path.display())),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

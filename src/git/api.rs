//! Public API for git operations.
//!
//! This module provides the stable public API for git-related functionality:
//! - The [`CommandRunner`] capability and the real [`GitRunner`]
//! - Typed wrappers for the git subcommands the tool issues
//! - The update pipeline
//!
//! ## Example: Updating one repository
//!
//! ```rust,no_run
//! use monolize::core::Repository;
//! use monolize::git::{update_repository, GitRunner};
//!
//! async fn refresh(repo: &Repository) {
//!     if let Err(e) = update_repository(&GitRunner::new(), repo, "main").await {
//!         eprintln!("{}: {e}", repo.name);
//!     }
//! }
//! ```

// Process execution
pub use super::runner::{CommandOutput, CommandRunner, GitError, GitRunner};

// Status
pub use super::status::Status;

// Update pipeline
pub use super::update::{update_all, update_repository, UpdateError};

// Operations used by discovery, the monorepo pipelines and tests
pub use super::operations::{
    add_all, commit, fetch_all, get_current_branch, get_remote_url, has_changes, init, pull,
    status_porcelain, submodule_add, submodule_fetch_all, submodule_init, submodule_status,
    submodule_update_remote,
};

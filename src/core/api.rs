//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery
//! - Settings loading
//! - Update statistics
//!
//! Internal implementation details are not exposed through this API.

// Discovery
pub use super::discovery::{
    find_repositories, is_git_repository, scan_repo_paths, DiscoveryError, Repository,
};

// Configuration
pub use super::config::{default_config_path, resolve_path, ConfigError, Settings};
pub use super::config::{APP_NAME, DEFAULT_MONOREPO_NAME};

// User-facing messages and monorepo contents
pub use super::config::{
    INITIAL_COMMIT_MESSAGE, MONOREPO_GITIGNORE, NO_REPOS_MESSAGE, SYNC_COMMIT_MESSAGE,
};

// Statistics
pub use super::stats::UpdateStatistics;

// Internal helpers for command modules
pub(crate) use super::config::{GITIGNORE_FILE_NAME, GITMODULES_FILE_NAME};
pub(crate) use super::progress::UpdateProgress;

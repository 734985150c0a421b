//! Repository discovery
//!
//! Only the immediate children of the root are inspected. A child counts as a
//! repository when it holds a `.git` directory or a `.git` symlink resolving to
//! one; `.git` files (worktree and submodule checkouts) are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::config::{GIT_DIR_NAME, UNKNOWN_REPO_NAME};
use crate::git::{get_current_branch, get_remote_url, CommandRunner};

/// A git repository found under the scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Absolute path of the working tree
    pub path: PathBuf,
    /// Final path segment
    pub name: String,
    /// URL of `origin`, None when it could not be read
    pub remote_url: Option<String>,
    /// Checked-out branch, None when it could not be read
    pub branch: Option<String>,
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read directory {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Checks whether `path` has a `.git` directory, directly or through a symlink
///
/// The symlink is followed: a dangling link, or one that resolves to a
/// gitdir pointer file, does not count.
pub fn is_git_repository(path: &Path) -> bool {
    fs::metadata(path.join(GIT_DIR_NAME)).is_ok_and(|meta| meta.is_dir())
}

/// Lists the immediate subdirectories of `root` that are git repositories
///
/// Returns the candidate paths without touching git. Fails only when `root`
/// itself cannot be listed; unreadable entries are skipped.
pub fn scan_repo_paths(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let entries = fs::read_dir(root).map_err(|source| DiscoveryError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // file_type does not follow symlinks, so symlinked children are not descended into
        if !entry.file_type().is_ok_and(|ft| ft.is_dir()) {
            continue;
        }

        let dir_path = entry.path();
        if is_git_repository(&dir_path) {
            match std::path::absolute(&dir_path) {
                Ok(abs) => paths.push(abs),
                Err(e) => debug!(path = %dir_path.display(), error = %e, "cannot make path absolute"),
            }
        }
    }

    // Sort alphabetically by name (case-insensitive) for stable console output
    paths.sort_by_key(|p| repo_name(p).to_lowercase());

    Ok(paths)
}

/// Discovers repositories under `root` and reads their remote URL and branch
///
/// Remote and branch are best effort: a repository without `origin`, or whose
/// HEAD cannot be resolved, is still returned with that field left empty.
pub async fn find_repositories<R: CommandRunner + ?Sized>(
    runner: &R,
    root: &Path,
) -> Result<Vec<Repository>, DiscoveryError> {
    let paths = scan_repo_paths(root)?;

    let mut repos = Vec::with_capacity(paths.len());
    for path in paths {
        let remote_url = get_remote_url(runner, &path).await;
        let branch = get_current_branch(runner, &path)
            .await
            .ok()
            .filter(|b| !b.is_empty());

        let repo = Repository {
            name: repo_name(&path),
            path,
            remote_url,
            branch,
        };
        debug!(repo = %repo, remote = ?repo.remote_url, branch = ?repo.branch, "found repository");
        repos.push(repo);
    }

    Ok(repos)
}

fn repo_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(UNKNOWN_REPO_NAME)
        .to_string()
}

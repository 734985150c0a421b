//! Basic git operations, one wrapper per subcommand the tool uses

use std::path::Path;

use super::runner::{CommandRunner, GitError};

// Git command arguments
const GIT_REMOTE_URL_ARGS: &[&str] = &["remote", "get-url", "origin"];
const GIT_REV_PARSE_HEAD_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
const GIT_FETCH_ALL_ARGS: &[&str] = &["fetch", "--all"];
const GIT_PULL_ARGS: &[&str] = &["pull", "origin"];
const GIT_INIT_ARGS: &[&str] = &["init"];
const GIT_ADD_ALL_ARGS: &[&str] = &["add", "."];
const GIT_COMMIT_ARGS: &[&str] = &["commit", "-m"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];
const GIT_SUBMODULE_ADD_ARGS: &[&str] = &["submodule", "add"];
const GIT_SUBMODULE_INIT_ARGS: &[&str] = &["submodule", "update", "--init", "--recursive"];
const GIT_SUBMODULE_REMOTE_MERGE_ARGS: &[&str] = &["submodule", "update", "--remote", "--merge"];
const GIT_SUBMODULE_FETCH_ARGS: &[&str] = &["submodule", "foreach", "git", "fetch", "--all"];
const GIT_SUBMODULE_STATUS_ARGS: &[&str] = &["submodule", "status"];

/// Reads the URL of the `origin` remote
/// Returns None when there is no such remote or it is empty
pub async fn get_remote_url<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Option<String> {
    match runner.run_checked(path, GIT_REMOTE_URL_ARGS).await {
        Ok(url) if !url.is_empty() => Some(url),
        _ => None,
    }
}

/// Reads the name of the checked-out branch (`HEAD` when detached)
pub async fn get_current_branch<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
) -> Result<String, GitError> {
    runner.run_checked(path, GIT_REV_PARSE_HEAD_ARGS).await
}

/// Fetches every configured remote
pub async fn fetch_all<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<(), GitError> {
    runner.run_checked(path, GIT_FETCH_ALL_ARGS).await.map(|_| ())
}

/// Pulls `branch` from `origin` into the current branch
pub async fn pull<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
    branch: &str,
) -> Result<(), GitError> {
    let mut args = Vec::from(GIT_PULL_ARGS);
    args.push(branch);
    runner.run_checked(path, &args).await.map(|_| ())
}

pub async fn init<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<(), GitError> {
    runner.run_checked(path, GIT_INIT_ARGS).await.map(|_| ())
}

/// Stages everything in the working tree
pub async fn add_all<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<(), GitError> {
    runner.run_checked(path, GIT_ADD_ALL_ARGS).await.map(|_| ())
}

pub async fn commit<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
    message: &str,
) -> Result<(), GitError> {
    let mut args = Vec::from(GIT_COMMIT_ARGS);
    args.push(message);
    runner.run_checked(path, &args).await.map(|_| ())
}

/// Returns the raw `git status --porcelain` output
pub async fn status_porcelain<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
) -> Result<String, GitError> {
    runner.run_checked(path, GIT_STATUS_PORCELAIN_ARGS).await
}

/// Checks if the working tree has any change, untracked files included
pub async fn has_changes<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<bool, GitError> {
    Ok(!status_porcelain(runner, path).await?.trim().is_empty())
}

/// Registers `url` as a submodule checked out at `name`
pub async fn submodule_add<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
    url: &str,
    name: &str,
) -> Result<(), GitError> {
    let mut args = Vec::from(GIT_SUBMODULE_ADD_ARGS);
    args.push(url);
    args.push(name);
    runner.run_checked(path, &args).await.map(|_| ())
}

/// Initializes and checks out all submodules recursively
pub async fn submodule_init<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<(), GitError> {
    runner.run_checked(path, GIT_SUBMODULE_INIT_ARGS).await.map(|_| ())
}

/// Runs `git fetch --all` inside every submodule
pub async fn submodule_fetch_all<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
) -> Result<(), GitError> {
    runner.run_checked(path, GIT_SUBMODULE_FETCH_ARGS).await.map(|_| ())
}

/// Moves every submodule to the tip of its tracked remote branch
pub async fn submodule_update_remote<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
) -> Result<(), GitError> {
    runner
        .run_checked(path, GIT_SUBMODULE_REMOTE_MERGE_ARGS)
        .await
        .map(|_| ())
}

/// Returns the raw `git submodule status` output
pub async fn submodule_status<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
) -> Result<String, GitError> {
    runner.run_checked(path, GIT_SUBMODULE_STATUS_ARGS).await
}

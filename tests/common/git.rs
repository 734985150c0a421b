//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;
use std::sync::Once;

static GIT_ENV: Once = Once::new();

/// Gives every git child process a test identity and allows local-path submodules
///
/// The library runs plain `git` without extra flags, so this goes through the
/// `GIT_CONFIG_*` environment inherited by child processes.
pub fn configure_git_env() {
    GIT_ENV.call_once(|| {
        let entries = [
            ("protocol.file.allow", "always"),
            ("user.name", "Test User"),
            ("user.email", "test@example.com"),
            ("commit.gpgsign", "false"),
            ("init.defaultBranch", "main"),
        ];
        std::env::set_var("GIT_CONFIG_COUNT", entries.len().to_string());
        for (i, (key, value)) in entries.iter().enumerate() {
            std::env::set_var(format!("GIT_CONFIG_KEY_{i}"), key);
            std::env::set_var(format!("GIT_CONFIG_VALUE_{i}"), value);
        }
    });
}

/// Runs git in `path` and fails with its stderr when it exits non-zero
pub fn git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(path).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Sets up a git repository with user config
pub fn setup_git_repo(path: &Path) -> Result<()> {
    configure_git_env();
    git(path, &["init", "-q"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    // Disable commit signing for tests
    git(path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;
    git(path, &["add", file_name])?;
    git(path, &["commit", "-q", "-m", message])?;
    Ok(())
}

/// Adds a git remote to a repository
pub fn add_git_remote(path: &Path, remote_name: &str, url: &str) -> Result<()> {
    git(path, &["remote", "add", remote_name, url])?;
    Ok(())
}

/// Number of commits reachable from HEAD
pub fn commit_count(path: &Path) -> Result<usize> {
    Ok(git(path, &["rev-list", "--count", "HEAD"])?.parse()?)
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

//! Test fixtures and builders

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{add_git_remote, configure_git_env, create_test_commit, git, setup_git_repo};

/// A scan root of repositories plus a separate directory of bare "origin" remotes
pub struct Workspace {
    pub temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        configure_git_env();
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("repos"))?;
        fs::create_dir(temp_dir.path().join("remotes"))?;
        Ok(Self { temp_dir })
    }

    /// Directory whose children are scanned
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("repos")
    }

    pub fn remote_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("remotes").join(format!("{name}.git"))
    }

    /// Creates `root/<name>` with one commit and no remote
    pub fn add_repo(&self, name: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::create_dir(&path)?;
        setup_git_repo(&path)?;
        create_test_commit(&path, "README.md", &format!("# {name}"), "Initial commit")?;
        Ok(path)
    }

    /// Creates `root/<name>` whose `origin` is a local bare repository holding its history
    pub fn add_repo_with_remote(&self, name: &str) -> Result<PathBuf> {
        let path = self.add_repo(name)?;
        let remote = self.remote_path(name);
        fs::create_dir(&remote)?;
        git(&remote, &["init", "-q", "--bare"])?;

        let remote_url = path_str(&remote)?;
        add_git_remote(&path, "origin", remote_url)?;
        let branch = git(&path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        git(&path, &["push", "-q", "-u", "origin", &branch])?;
        // Keep the bare repository's HEAD on the branch that was pushed
        git(&remote, &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")])?;
        Ok(path)
    }

    /// Commits `file_name` directly to the bare remote of `name` through a scratch clone
    pub fn push_upstream_change(&self, name: &str, file_name: &str) -> Result<()> {
        let scratch = self.temp_dir.path().join(format!("scratch-{name}-{file_name}"));
        let remote = self.remote_path(name);
        git(
            self.temp_dir.path(),
            &["clone", "-q", path_str(&remote)?, path_str(&scratch)?],
        )?;
        create_test_commit(&scratch, file_name, "upstream change", "Upstream change")?;
        git(&scratch, &["push", "-q", "origin", "HEAD"])?;
        Ok(())
    }
}

pub fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Path contains invalid UTF-8 characters"))
}

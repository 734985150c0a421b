//! Monorepo creation

use std::fs;
use tracing::{info, warn};

use super::{Monorepo, MonorepoError};
use crate::core::{
    Repository, GITIGNORE_FILE_NAME, INITIAL_COMMIT_MESSAGE, MONOREPO_GITIGNORE, NO_REPOS_MESSAGE,
};
use crate::git::{add_all, commit, init, submodule_add, submodule_init, CommandRunner};

/// What happened while assembling a monorepo
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateReport {
    /// Names registered as submodules
    pub added: Vec<String>,
    /// (name, reason) for repositories left out
    pub skipped: Vec<(String, String)>,
    /// Whether the initial commit was recorded
    pub committed: bool,
}

impl CreateReport {
    /// True when the input set was empty and nothing was done
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.skipped.is_empty()
    }
}

impl<R: CommandRunner + ?Sized> Monorepo<'_, R> {
    /// Creates a new repository embedding `repos` as submodules
    ///
    /// Steps run in order: mkdir, `git init`, `.gitignore`, one `submodule add`
    /// per repository, `submodule update --init --recursive`, then add and
    /// commit. A repository without a remote URL, or whose `submodule add`
    /// fails, is skipped with a warning. A failed commit is only a warning.
    pub async fn create(&self, repos: &[Repository]) -> Result<CreateReport, MonorepoError> {
        self.ensure_absent()?;

        let mut report = CreateReport::default();
        if repos.is_empty() {
            info!(path = %self.path.display(), "{}", NO_REPOS_MESSAGE);
            return Ok(report);
        }

        info!(path = %self.path.display(), "creating monorepo");

        fs::create_dir_all(&self.path).map_err(|source| MonorepoError::Io {
            action: "failed to create directory",
            path: self.path.clone(),
            source,
        })?;

        init(self.runner, &self.path)
            .await
            .map_err(MonorepoError::git("init git repository"))?;

        let gitignore = self.path.join(GITIGNORE_FILE_NAME);
        fs::write(&gitignore, MONOREPO_GITIGNORE).map_err(|source| MonorepoError::Io {
            action: "failed to write",
            path: gitignore,
            source,
        })?;

        for repo in repos {
            let Some(url) = repo.remote_url.as_deref() else {
                warn!(repo = %repo.name, "no remote URL available, skipping submodule");
                report
                    .skipped
                    .push((repo.name.clone(), "no remote URL available".to_string()));
                continue;
            };

            info!(name = %repo.name, url, "adding submodule");
            match submodule_add(self.runner, &self.path, url, &repo.name).await {
                Ok(()) => report.added.push(repo.name.clone()),
                Err(e) => {
                    warn!(repo = %repo.name, error = %e, "failed to add submodule");
                    report.skipped.push((repo.name.clone(), e.to_string()));
                }
            }
        }

        submodule_init(self.runner, &self.path)
            .await
            .map_err(MonorepoError::git("initialize submodules"))?;

        if self.auto_commit {
            report.committed = self.commit_all(INITIAL_COMMIT_MESSAGE).await;
        }

        info!(
            path = %self.path.display(),
            added = report.added.len(),
            skipped = report.skipped.len(),
            "monorepo created"
        );
        Ok(report)
    }

    /// Stages everything and commits; failure is logged, never returned
    pub(crate) async fn commit_all(&self, message: &str) -> bool {
        let result = match add_all(self.runner, &self.path).await {
            Ok(()) => commit(self.runner, &self.path, message).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to commit");
                false
            }
        }
    }
}

//! Update pipeline: bring one repository's current branch up to date

use thiserror::Error;
use tracing::debug;

use super::operations::{fetch_all, get_current_branch, pull};
use super::runner::{CommandRunner, GitError};
use super::status::Status;
use crate::core::{Repository, UpdateStatistics};

/// Reason a single repository could not be updated
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to fetch: {0}")]
    Fetch(#[source] GitError),

    #[error("failed to pull '{branch}': {source}")]
    Pull {
        branch: String,
        #[source]
        source: GitError,
    },
}

impl UpdateError {
    pub fn status(&self) -> Status {
        match self {
            UpdateError::Fetch(_) => Status::FetchError,
            UpdateError::Pull { .. } => Status::PullError,
        }
    }
}

/// Fetches all remotes, then pulls the current branch from `origin`
///
/// The branch recorded at discovery time is used when present; otherwise it
/// is queried again, falling back to `default_branch` when git cannot name it.
/// A failed fetch aborts before the pull.
pub async fn update_repository<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &Repository,
    default_branch: &str,
) -> Result<(), UpdateError> {
    fetch_all(runner, &repo.path)
        .await
        .map_err(UpdateError::Fetch)?;

    let branch = match &repo.branch {
        Some(branch) => branch.clone(),
        None => match get_current_branch(runner, &repo.path).await {
            Ok(branch) if !branch.is_empty() => branch,
            Ok(_) | Err(_) => {
                debug!(
                    repo = %repo.name,
                    default_branch,
                    "could not determine current branch, using default"
                );
                default_branch.to_string()
            }
        },
    };

    debug!(repo = %repo.name, branch = %branch, "pulling");
    pull(runner, &repo.path, &branch)
        .await
        .map_err(|source| UpdateError::Pull { branch, source })
}

/// Updates every repository in order, one at a time
///
/// Nothing is logged above debug level here, since callers draw progress on
/// stderr while this runs.
///
/// A failure never stops the loop. `on_done` is called after each repository
/// with its index in `repos` and the outcome.
pub async fn update_all<R, F>(
    runner: &R,
    repos: &[Repository],
    default_branch: &str,
    mut on_done: F,
) -> UpdateStatistics
where
    R: CommandRunner + ?Sized,
    F: FnMut(usize, &Repository, &Result<(), UpdateError>),
{
    let mut statistics = UpdateStatistics::new();

    for (index, repo) in repos.iter().enumerate() {
        debug!(repo = %repo.name, path = %repo.path.display(), "updating repository");
        let result = update_repository(runner, repo, default_branch).await;
        match &result {
            Ok(()) => statistics.record_success(),
            Err(e) => {
                // Progress bars own stderr while the loop runs; the summary reports failures
                debug!(repo = %repo.name, error = %e, "failed to update repository");
                statistics.record_failure(repo, e);
            }
        }
        on_done(index, repo, &result);
    }

    statistics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::fake::FakeRunner;
    use std::path::PathBuf;

    fn repo(branch: Option<&str>) -> Repository {
        Repository {
            path: PathBuf::from("/work/alpha"),
            name: "alpha".to_string(),
            remote_url: Some("https://example.com/alpha.git".to_string()),
            branch: branch.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_fetch_then_pull_known_branch() {
        let runner = FakeRunner::new();
        update_repository(&runner, &repo(Some("dev")), "main")
            .await
            .unwrap();

        assert_eq!(runner.commands(), vec!["fetch --all", "pull origin dev"]);
        assert!(runner
            .calls()
            .iter()
            .all(|(dir, _)| dir == &PathBuf::from("/work/alpha")));
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_pull() {
        let runner = FakeRunner::new().fail(&["fetch"], "could not resolve host");
        let err = update_repository(&runner, &repo(Some("main")), "main")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Status::FetchError);
        assert_eq!(runner.commands(), vec!["fetch --all"]);
    }

    #[tokio::test]
    async fn test_unknown_branch_is_queried() {
        let runner = FakeRunner::new().succeed(&["rev-parse"], "feature");
        update_repository(&runner, &repo(None), "main").await.unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "fetch --all",
                "rev-parse --abbrev-ref HEAD",
                "pull origin feature"
            ]
        );
    }

    #[tokio::test]
    async fn test_unresolvable_branch_falls_back_to_default() {
        let runner = FakeRunner::new().fail(&["rev-parse"], "ambiguous argument 'HEAD'");
        update_repository(&runner, &repo(None), "trunk").await.unwrap();

        assert_eq!(runner.commands().last().unwrap(), "pull origin trunk");
    }

    #[tokio::test]
    async fn test_pull_failure_reports_branch() {
        let runner = FakeRunner::new().fail(&["pull"], "fatal: 'origin' does not appear to be a git repository");
        let err = update_repository(&runner, &repo(Some("main")), "main")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Status::PullError);
        assert!(err.to_string().contains("'main'"));
    }

    #[tokio::test]
    async fn test_update_all_continues_after_failure() {
        let runner = FakeRunner::new().fail(&["pull", "origin", "broken"], "no such ref");
        let repos = vec![
            repo(Some("broken")),
            Repository {
                name: "beta".to_string(),
                path: PathBuf::from("/work/beta"),
                ..repo(Some("main"))
            },
        ];

        let mut seen = Vec::new();
        let stats = update_all(&runner, &repos, "main", |index, repo, result| {
            seen.push((index, repo.name.clone(), result.is_ok()));
        })
        .await;

        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.failed_repos[0].0, "alpha");
        assert_eq!(
            seen,
            vec![(0, "alpha".to_string(), false), (1, "beta".to_string(), true)]
        );
        assert_eq!(runner.commands().len(), 4);
    }

    #[tokio::test]
    async fn test_update_all_stays_quiet_at_warn_level() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // Branch lookup fails (fallback path) and the pull fails
        let runner = FakeRunner::new()
            .fail(&["rev-parse"], "ambiguous argument 'HEAD'")
            .fail(&["pull"], "couldn't find remote ref main");
        let stats = update_all(&runner, &[repo(None)], "main", |_, _, _| {}).await;

        assert_eq!(stats.failed, 1);
        assert!(captured.0.lock().unwrap().is_empty());
    }
}

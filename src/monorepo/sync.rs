//! Monorepo submodule synchronization

use tracing::{info, warn};

use super::{Monorepo, MonorepoError};
use crate::core::SYNC_COMMIT_MESSAGE;
use crate::git::{has_changes, submodule_fetch_all, submodule_update_remote, CommandRunner};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// `submodule foreach git fetch --all` succeeded
    pub fetched: bool,
    /// The working tree changed after updating submodules
    pub changed: bool,
    pub committed: bool,
}

impl<R: CommandRunner + ?Sized> Monorepo<'_, R> {
    /// Moves every submodule to the latest commit of its tracked branch
    ///
    /// The fetch step only warns on failure; `submodule update --remote --merge`
    /// failing aborts. A commit is made only when `git status --porcelain`
    /// reports changes.
    pub async fn sync(&self) -> Result<SyncReport, MonorepoError> {
        self.ensure_monorepo()?;
        info!(path = %self.path.display(), "syncing submodules");

        let mut report = SyncReport::default();

        match submodule_fetch_all(self.runner, &self.path).await {
            Ok(()) => report.fetched = true,
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to fetch submodules"),
        }

        submodule_update_remote(self.runner, &self.path)
            .await
            .map_err(MonorepoError::git("update submodules"))?;

        report.changed = has_changes(self.runner, &self.path)
            .await
            .map_err(MonorepoError::git("check status"))?;

        if !report.changed {
            info!("no changes to commit");
        } else if self.auto_commit {
            report.committed = self.commit_all(SYNC_COMMIT_MESSAGE).await;
            if report.committed {
                info!("changes committed to monorepo");
            }
        }

        Ok(report)
    }
}

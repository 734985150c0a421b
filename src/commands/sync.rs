//! Monorepo sync command implementation

use anyhow::{Context, Result};
use std::path::Path;

use super::monorepo_path_or_cwd;
use crate::core::Settings;
use crate::git::CommandRunner;
use crate::monorepo::{Monorepo, SyncReport};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

/// Handles the sync command for the monorepo at `path` (current directory when None)
pub async fn handle_sync_command<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
    path: Option<&Path>,
) -> Result<SyncReport> {
    let path = monorepo_path_or_cwd(path)?;
    let monorepo = Monorepo::new(&path, runner).auto_commit(settings.auto_commit);
    monorepo.ensure_monorepo()?;

    set_terminal_title("🚀 monolize sync");
    println!("Syncing all submodules in: {}\n", path.display());

    let report = monorepo
        .sync()
        .await
        .context("failed to sync submodules")?;

    if !report.fetched {
        println!("⚠️  Fetching submodules failed; updated from already fetched refs");
    }
    match (report.changed, report.committed) {
        (false, _) => println!("Submodules already up to date"),
        (true, true) => println!("Changes committed to monorepo"),
        (true, false) => println!("Submodules changed; changes left uncommitted"),
    }

    println!("\n✓ All submodules synced successfully!");
    set_terminal_title_and_flush("✅ monolize");
    Ok(report)
}

//! Repository update command implementation
//!
//! Discovers the repositories under the configured path and runs fetch + pull
//! in each, one after another.

use anyhow::{Context, Result};
use std::time::Instant;

use crate::core::{
    find_repositories, resolve_path, Settings, UpdateProgress, UpdateStatistics, NO_REPOS_MESSAGE,
};
use crate::git::{update_all, CommandRunner};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

/// Handles the update command
///
/// Per-repository failures are tallied, not returned; only an unreadable root
/// makes this fail.
pub async fn handle_update_command<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
) -> Result<UpdateStatistics> {
    let root = resolve_path(&settings.path)
        .with_context(|| format!("failed to resolve path: {}", settings.path.display()))?;

    set_terminal_title("🚀 monolize update");
    println!("Scanning for git repositories in: {}", root.display());

    let start_time = Instant::now();
    let repos = find_repositories(runner, &root)
        .await
        .context("failed to find repositories")?;

    if repos.is_empty() {
        println!("{NO_REPOS_MESSAGE}");
        set_terminal_title_and_flush("✅ monolize");
        return Ok(UpdateStatistics::new());
    }

    let repo_word = if repos.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    println!("Updating {} {}\n", repos.len(), repo_word);

    let progress = UpdateProgress::new(&repos)?;
    progress.start(0);
    let statistics = update_all(runner, &repos, &settings.default_branch, |index, repo, result| {
        progress.finish(index, repo, result);
        progress.start(index + 1);
    })
    .await;

    println!();
    let detailed_summary = statistics.generate_detailed_summary();
    if !detailed_summary.is_empty() {
        println!("{}", "━".repeat(70));
        println!("{detailed_summary}");
        println!("{}", "━".repeat(70));
    }
    println!("{}", statistics.generate_summary(start_time.elapsed()));

    set_terminal_title_and_flush("✅ monolize");
    Ok(statistics)
}

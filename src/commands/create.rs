//! Monorepo create command implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::{find_repositories, resolve_path, Settings, APP_NAME, NO_REPOS_MESSAGE};
use crate::git::CommandRunner;
use crate::monorepo::{CreateReport, Monorepo};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

/// Handles the create command
///
/// Repositories are discovered under `settings.path`; the monorepo is built at
/// `<output>/<name>`, where `output` defaults to the same source path.
pub async fn handle_create_command<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
    name: &str,
    output: Option<&Path>,
) -> Result<CreateReport> {
    let source = resolve_path(&settings.path)
        .with_context(|| format!("failed to resolve path: {}", settings.path.display()))?;
    let output = match output {
        Some(dir) => resolve_path(dir)
            .with_context(|| format!("failed to resolve path: {}", dir.display()))?,
        None => source.clone(),
    };

    let monorepo = Monorepo::new(output.join(name), runner).auto_commit(settings.auto_commit);

    // Checked before discovery so an existing target never triggers any git command
    monorepo.ensure_absent()?;

    set_terminal_title("🚀 monolize create");
    println!("Scanning for git repositories in: {}", source.display());

    let repos = find_repositories(runner, &source)
        .await
        .context("failed to find repositories")?;

    if repos.is_empty() {
        println!("{NO_REPOS_MESSAGE}");
        set_terminal_title_and_flush("✅ monolize");
        return Ok(CreateReport::default());
    }

    println!("Found {} repository(s)", repos.len());
    for repo in &repos {
        println!(
            "  - {} ({})",
            repo.name,
            repo.remote_url.as_deref().unwrap_or("no remote")
        );
    }
    println!();
    println!("Creating monorepo at: {}", monorepo.path().display());

    let report = monorepo
        .create(&repos)
        .await
        .context("failed to create monorepo")?;

    println!();
    for name in &report.added {
        println!("  🟢 {name}");
    }
    for (name, reason) in &report.skipped {
        println!("  🟠 {name:20} # {reason}");
    }
    if !report.committed {
        println!("Note: no initial commit was recorded");
    }

    println!("\n✓ Monorepo created successfully!");
    println!("Location: {}", monorepo.path().display());
    println!("\nTo sync all submodules, run:");
    println!("  {APP_NAME} sync {}", monorepo.path().display());

    set_terminal_title_and_flush("✅ monolize");
    Ok(report)
}

//! Monorepo status command implementation

use anyhow::{Context, Result};
use std::path::Path;

use super::monorepo_path_or_cwd;
use crate::git::CommandRunner;
use crate::monorepo::{Monorepo, Submodule};

/// Handles the status command: one line per registered submodule
pub async fn handle_status_command<R: CommandRunner + ?Sized>(
    runner: &R,
    path: Option<&Path>,
) -> Result<Vec<Submodule>> {
    let path = monorepo_path_or_cwd(path)?;
    let submodules = Monorepo::new(&path, runner)
        .submodules()
        .await
        .context("failed to read submodule status")?;

    println!("Submodules in: {}\n", path.display());
    if submodules.is_empty() {
        println!("No submodules registered.");
        return Ok(submodules);
    }

    let width = submodules.iter().map(|s| s.path.len()).max().unwrap_or(0);
    for submodule in &submodules {
        println!(
            "{} {:width$}  {}  {:<13} {}",
            submodule.state.symbol(),
            submodule.path,
            submodule.short_hash(),
            submodule.state.text(),
            submodule.describe.as_deref().unwrap_or("")
        );
    }

    Ok(submodules)
}

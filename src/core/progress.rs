//! Progress bar management for the update loop

use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use super::config::{DEFAULT_PROGRESS_BAR_LENGTH, PROGRESS_CHARS, PROGRESS_TEMPLATE};
use super::discovery::Repository;
use crate::git::{Status, UpdateError};

/// One progress line per repository, created up front so output order is stable
pub struct UpdateProgress {
    bars: Vec<ProgressBar>,
    max_name_length: usize,
}

impl UpdateProgress {
    pub fn new(repos: &[Repository]) -> Result<Self> {
        let multi_progress = MultiProgress::new();
        let style = create_progress_style()?;
        let max_name_length = repos.iter().map(|r| r.name.len()).max().unwrap_or(0);

        let bars = repos
            .iter()
            .map(|repo| create_progress_bar(&multi_progress, &style, &repo.name, max_name_length))
            .collect();

        Ok(Self {
            bars,
            max_name_length,
        })
    }

    /// Marks the bar at `index` as in progress
    pub fn start(&self, index: usize) {
        if let Some(pb) = self.bars.get(index) {
            pb.set_message("updating...");
        }
    }

    /// Marks the bar at `index` with the final outcome of that repository
    pub fn finish(&self, index: usize, repo: &Repository, result: &Result<(), UpdateError>) {
        let Some(pb) = self.bars.get(index) else {
            return;
        };

        let (status, message) = match result {
            Ok(()) => (Status::Updated, branch_label(repo)),
            Err(e) => (e.status(), e.to_string()),
        };
        pb.set_prefix(format!(
            "{} {:width$}",
            status.symbol(),
            repo.name,
            width = self.max_name_length
        ));
        pb.finish_with_message(format!("{:<12} {}", status.text(), message));
    }
}

fn branch_label(repo: &Repository) -> String {
    match &repo.branch {
        Some(branch) => format!("on {branch}"),
        None => String::new(),
    }
}

/// Creates and configures a progress bar for a repository
pub(crate) fn create_progress_bar(
    multi: &MultiProgress,
    style: &ProgressStyle,
    repo_name: &str,
    width: usize,
) -> ProgressBar {
    let pb = multi.add(ProgressBar::new(DEFAULT_PROGRESS_BAR_LENGTH));
    pb.set_style(style.clone());
    pb.set_prefix(format!("🟡 {repo_name:width$}"));
    pb.set_message("waiting...");
    pb
}

/// Creates a progress bar style configuration
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}

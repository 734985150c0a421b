//! Statistics tracking for the update loop

use std::time::Duration;

use super::config::PATH_DISPLAY_WIDTH;
use super::discovery::Repository;
use crate::git::UpdateError;

/// Tally of repository update results
#[derive(Debug, Clone, Default)]
pub struct UpdateStatistics {
    pub succeeded: u32,
    pub failed: u32,
    pub failed_repos: Vec<(String, String, String)>, // (repo_name, repo_path, error_message)
}

impl UpdateStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, repo: &Repository, error: &UpdateError) {
        self.failed += 1;
        self.failed_repos.push((
            repo.name.clone(),
            repo.path.display().to_string(),
            error.to_string(),
        ));
    }

    /// One-line tally printed when the loop finishes
    pub fn generate_summary(&self, duration: Duration) -> String {
        format!(
            "Update complete: {} succeeded, {} failed ({:.1}s)",
            self.succeeded,
            self.failed,
            duration.as_secs_f64()
        )
    }

    /// Lists failed repositories, empty when everything succeeded
    pub fn generate_detailed_summary(&self) -> String {
        if self.failed_repos.is_empty() {
            return String::new();
        }

        let mut lines = vec![format!("🔴 FAILED REPOS ({})", self.failed_repos.len())];
        for (i, (repo_name, repo_path, error)) in self.failed_repos.iter().enumerate() {
            let tree_char = if i == self.failed_repos.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            let short_path = crate::utils::shorten_path(repo_path, PATH_DISPLAY_WIDTH);
            lines.push(format!(
                "   {} {:20} {:30} # {}",
                tree_char, repo_name, short_path, error
            ));
        }

        lines.join("\n")
    }
}

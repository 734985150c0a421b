//! Configuration constants and settings

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const APP_NAME: &str = "monolize";

// Configuration sources
pub const CONFIG_FILE_NAME: &str = ".monolize.yaml";
pub const ENV_PREFIX: &str = "MONOLIZE_";

// Defaults
pub const DEFAULT_PATH: &str = ".";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_MONOREPO_NAME: &str = "monorepo";

// Repository layout
pub const GIT_DIR_NAME: &str = ".git";
pub const GITMODULES_FILE_NAME: &str = ".gitmodules";
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";
pub const UNKNOWN_REPO_NAME: &str = "unknown";

// Monorepo contents
pub const MONOREPO_GITIGNORE: &str = "# Monorepo artifacts\n.gitmodules.backup\n*.log\n";
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit: Add all repositories as submodules";
pub const SYNC_COMMIT_MESSAGE: &str = "Update submodules to latest versions";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No git repositories found.";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} {wide_msg}";
pub const PROGRESS_CHARS: &str = "##-";
pub const DEFAULT_PROGRESS_BAR_LENGTH: u64 = 100;

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Resolved tool settings
///
/// Built from defaults, then the YAML file, then `MONOLIZE_*` environment
/// variables; command-line flags are applied last by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory whose immediate children are scanned
    pub path: PathBuf,
    /// Branch to pull when the current one cannot be determined
    pub default_branch: String,
    /// Commit in the monorepo after create and sync
    pub auto_commit: bool,
    pub verbose: bool,
    /// Upper bound for every git invocation; unset means wait forever
    pub git_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            default_branch: DEFAULT_BRANCH.to_string(),
            auto_commit: true,
            verbose: false,
            git_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Loads settings from `explicit` (must exist) or `~/.monolize.yaml` (optional),
    /// then applies the process environment
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Overrides fields from `MONOLIZE_<KEY>` variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}")).filter(|v| !v.is_empty());

        if let Some(path) = var("PATH") {
            self.path = PathBuf::from(path);
        }
        if let Some(branch) = var("DEFAULT_BRANCH") {
            self.default_branch = branch;
        }
        if let Some(value) = var("AUTO_COMMIT") {
            self.auto_commit = parse_bool("auto_commit", &value)?;
        }
        if let Some(value) = var("VERBOSE") {
            self.verbose = parse_bool("verbose", &value)?;
        }
        if let Some(value) = var("GIT_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "git_timeout_secs".to_string(),
                    reason: e.to_string(),
                })?;
            self.git_timeout_secs = (secs > 0).then_some(secs);
        }

        Ok(())
    }

    pub fn git_timeout(&self) -> Option<Duration> {
        self.git_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// `~/.monolize.yaml`, when a home directory is known
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Makes `path` absolute against the current directory without touching the filesystem
pub fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return std::env::current_dir();
    }
    std::path::absolute(path)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

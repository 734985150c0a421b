//! Submodule listing for an existing monorepo

use super::{Monorepo, MonorepoError};
use crate::git::{submodule_status, CommandRunner};

/// State encoded in the first column of `git submodule status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    /// Checked out at the recorded commit
    Current,
    /// Registered but not initialized
    Uninitialized,
    /// Checked-out commit differs from the one recorded in the index
    Modified,
    /// Has merge conflicts
    Conflicted,
}

impl SubmoduleState {
    fn from_prefix(prefix: char) -> Self {
        match prefix {
            '-' => SubmoduleState::Uninitialized,
            '+' => SubmoduleState::Modified,
            'U' => SubmoduleState::Conflicted,
            _ => SubmoduleState::Current,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            SubmoduleState::Current => "🟢",
            SubmoduleState::Uninitialized => "🟠",
            SubmoduleState::Modified => "🟡",
            SubmoduleState::Conflicted => "🔴",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SubmoduleState::Current => "current",
            SubmoduleState::Uninitialized => "uninitialized",
            SubmoduleState::Modified => "modified",
            SubmoduleState::Conflicted => "conflict",
        }
    }
}

/// One line of `git submodule status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    pub path: String,
    pub commit: String,
    pub state: SubmoduleState,
    /// Output of `git describe` for the commit, when git printed one
    pub describe: Option<String>,
}

impl Submodule {
    pub fn short_hash(&self) -> &str {
        &self.commit[..self.commit.len().min(7)]
    }
}

/// Parses `git submodule status` output, ignoring lines it cannot read
///
/// Line format: `<state><sha1> <path>[ (<describe>)]`
pub fn parse_submodule_status(output: &str) -> Vec<Submodule> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Submodule> {
    // The leading space of an up-to-date entry may already be trimmed away
    let (prefix, rest) = match line.chars().next()? {
        c @ ('-' | '+' | 'U' | ' ') => (c, &line[1..]),
        _ => (' ', line),
    };

    let (commit, remainder) = rest.split_once(' ')?;
    if commit.is_empty() || !commit.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let remainder = remainder.trim();
    let (path, describe) = match remainder.rfind(" (") {
        Some(idx) if remainder.ends_with(')') => (
            &remainder[..idx],
            Some(remainder[idx + 2..remainder.len() - 1].to_string()),
        ),
        _ => (remainder, None),
    };
    if path.is_empty() {
        return None;
    }

    Some(Submodule {
        path: path.to_string(),
        commit: commit.to_string(),
        state: SubmoduleState::from_prefix(prefix),
        describe,
    })
}

impl<R: CommandRunner + ?Sized> Monorepo<'_, R> {
    /// Lists the submodules registered in the monorepo
    pub async fn submodules(&self) -> Result<Vec<Submodule>, MonorepoError> {
        self.ensure_monorepo()?;
        let output = submodule_status(self.runner, &self.path)
            .await
            .map_err(MonorepoError::git("list submodules"))?;
        Ok(parse_submodule_status(&output))
    }
}

//! Per-repository outcome of the update pipeline

/// Status enum representing the result of updating one repository
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    /// Fetch and pull both succeeded
    Updated,
    /// `git fetch --all` failed, pull was not attempted
    FetchError,
    /// Fetch succeeded but the pull failed
    PullError,
}

impl Status {
    /// Returns the emoji symbol for this status
    pub fn symbol(&self) -> &str {
        match self {
            Status::Updated => "🟢",
            Status::FetchError | Status::PullError => "🔴",
        }
    }

    /// Returns the text representation of this status
    pub fn text(&self) -> &str {
        match self {
            Status::Updated => "updated",
            Status::FetchError => "fetch-failed",
            Status::PullError => "pull-failed",
        }
    }
}

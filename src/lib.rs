//! # monolize
//!
//! `monolize` finds the git repositories directly under a directory, brings
//! each one up to date (fetch + pull) and can assemble them into a
//! "monorepo" that embeds every repository as a git submodule. It powers the
//! `monolize` CLI tool.
//!
//! ## Core Features
//!
//! - **Discovery**: immediate subdirectories holding a `.git` directory (or a symlink to one).
//! - **Update**: `git fetch --all` then `git pull origin <branch>`, sequentially.
//! - **Monorepo create/sync/status**: submodule assembly and maintenance.
//!
//! All git access goes through [`git::CommandRunner`], so every pipeline can
//! be driven by a scripted runner instead of the real binary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use monolize::core::find_repositories;
//! use monolize::git::GitRunner;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repos = find_repositories(&GitRunner::new(), Path::new(".")).await?;
//!     for repo in repos {
//!         println!("{}: {}", repo.name, repo.remote_url.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod monorepo;
pub mod utils;

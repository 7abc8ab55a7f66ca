//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the two git queries
//! the version engine needs: finding the latest release tag and listing the
//! commits since it. The concrete implementations are:
//!
//! - [repository::GitRepository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a mock implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::GitRepository;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SemverNextError};

/// A commit as the classifier sees it: hash, title (first line of the
/// message), and body (rest of the message, not including the title).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub sha: String,
    pub title: String,
    pub body: String,
}

impl Commit {
    /// Build a commit from a full message, splitting title from body
    pub fn from_message(sha: impl Into<String>, message: &str) -> Self {
        let (title, body) = match message.split_once('\n') {
            Some((title, body)) => (title.trim_end(), body.trim()),
            None => (message.trim_end(), ""),
        };
        Commit {
            sha: sha.into(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sha, self.title)
    }
}

/// Which tags version discovery considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    /// Only tags reachable from the current branch
    #[default]
    CurrentBranch,
    /// All tags in the repository
    AllBranches,
}

impl FromStr for TagMode {
    type Err = SemverNextError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "current" | "current-branch" => Ok(TagMode::CurrentBranch),
            "all" | "all-branches" => Ok(TagMode::AllBranches),
            other => Err(SemverNextError::config(format!(
                "Invalid tag mode '{}': expected 'current-branch' or 'all-branches'",
                other
            ))),
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagMode::CurrentBranch => write!(f, "current-branch"),
            TagMode::AllBranches => write!(f, "all-branches"),
        }
    }
}

/// Read-only git queries the version engine depends on
///
/// All implementors must be `Send + Sync` so evaluations can run concurrently
/// from multiple callers. Implementations map underlying errors (like
/// `git2::Error`) to [crate::error::SemverNextError] and never retry; the
/// engine treats retrieval as synchronous and authoritative.
pub trait Repository: Send + Sync {
    /// Get the latest version tag visible under `tag_mode`
    ///
    /// Tags are ordered version-aware descending, so the first match is the
    /// highest version. When `pattern` is given, only tags matching the glob
    /// are considered, and it is an error if none do.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The latest matching tag name
    /// * `Ok(None)` - The repository has no tags at all
    /// * `Err` - Git failure, or a pattern that matches no tag
    fn describe_tag(&self, tag_mode: TagMode, pattern: Option<&str>) -> Result<Option<String>>;

    /// Get commits from `tag` (exclusive) to the current position, newest first
    ///
    /// When `tag` is `None`, returns every commit reachable from the current
    /// position. When `paths` is non-empty, only commits touching at least one
    /// of the given paths count.
    fn changelog(&self, tag: Option<&str>, paths: &[String]) -> Result<Vec<Commit>>;
}

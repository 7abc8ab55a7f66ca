use crate::error::Result;
use crate::git::{Commit, Repository, TagMode};

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tag: Option<String>,
    commits: Vec<Commit>,
    fail_describe: bool,
    fail_changelog: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Set the tag returned by `describe_tag`
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// Append a commit to the changelog (newest first, like the real thing)
    pub fn add_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Append a commit built from a full message
    pub fn add_commit_message(&mut self, sha: &str, message: &str) {
        self.commits.push(Commit::from_message(sha, message));
    }

    /// Make `describe_tag` fail with a git error
    pub fn fail_describe_tag(&mut self) {
        self.fail_describe = true;
    }

    /// Make `changelog` fail with a git error
    pub fn fail_changelog(&mut self) {
        self.fail_changelog = true;
    }
}

impl Repository for MockRepository {
    // Simplified: the tag mode and pattern are ignored, the configured tag is
    // returned as-is.
    fn describe_tag(&self, _tag_mode: TagMode, _pattern: Option<&str>) -> Result<Option<String>> {
        if self.fail_describe {
            return Err(git2::Error::from_str("mock describe-tag failure").into());
        }
        Ok(self.tag.clone())
    }

    // Simplified: the tag boundary and path filters are ignored, all
    // configured commits are returned in insertion order.
    fn changelog(&self, _tag: Option<&str>, _paths: &[String]) -> Result<Vec<Commit>> {
        if self.fail_changelog {
            return Err(git2::Error::from_str("mock changelog failure").into());
        }
        Ok(self.commits.clone())
    }
}

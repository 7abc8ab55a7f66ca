use std::cmp::Ordering;
use std::path::Path;

use git2::{DiffOptions, ObjectType, Oid, Repository as Git2Repo};
use glob::Pattern;
use semver::Version;

use crate::error::{Result, SemverNextError};
use crate::git::{Commit, Repository, TagMode};

/// Wrapper around git2::Repository implementing the engine's trait interface
pub struct GitRepository {
    repo: Git2Repo,
}

impl GitRepository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(GitRepository { repo })
    }

    fn head_oid(&self) -> Result<Oid> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id())
    }

    /// All tag names with the commit each one points at (annotated tags are
    /// peeled to their target commit)
    fn tag_targets(&self) -> Result<Vec<(String, Oid)>> {
        let mut tags = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            if let Ok(reference) = self.repo.find_reference(&format!("refs/tags/{}", name)) {
                if let Ok(object) = reference.peel(ObjectType::Commit) {
                    tags.push((name.to_string(), object.id()));
                }
            }
        }

        Ok(tags)
    }

    /// Whether `target` is an ancestor of (or equal to) `head`
    fn is_merged(&self, head: Oid, target: Oid) -> bool {
        if head == target {
            return true;
        }
        self.repo
            .merge_base(head, target)
            .map(|base| base == target)
            .unwrap_or(false)
    }

    fn resolve_tag(&self, tag: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag))
            .map_err(|e| SemverNextError::tag(format!("Cannot find tag '{}': {}", tag, e)))?;
        let object = reference
            .peel(ObjectType::Commit)
            .map_err(|e| SemverNextError::tag(format!("Cannot peel tag '{}': {}", tag, e)))?;
        Ok(object.id())
    }

    /// Whether the commit changed anything under the given paths, diffing
    /// against its first parent (or the empty tree for a root commit)
    fn touches_paths(&self, commit: &git2::Commit<'_>, paths: &[String]) -> Result<bool> {
        let mut opts = DiffOptions::new();
        for path in paths {
            opts.pathspec(path);
        }

        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        Ok(diff.deltas().len() > 0)
    }
}

impl Repository for GitRepository {
    fn describe_tag(&self, tag_mode: TagMode, pattern: Option<&str>) -> Result<Option<String>> {
        let mut tags = self.tag_targets()?;
        if tags.is_empty() {
            return Ok(None);
        }

        if tag_mode == TagMode::CurrentBranch {
            let head = self.head_oid()?;
            tags.retain(|(_, oid)| self.is_merged(head, *oid));
            if tags.is_empty() {
                return Ok(None);
            }
        }

        // Version-aware descending order, so the first match is the latest
        // release.
        tags.sort_by(|(a, _), (b, _)| compare_tag_names(b, a));

        match pattern {
            None => Ok(Some(tags[0].0.clone())),
            Some(pattern) => {
                let glob = Pattern::new(pattern).map_err(|e| {
                    SemverNextError::tag(format!("Invalid tag pattern '{}': {}", pattern, e))
                })?;

                for (name, _) in &tags {
                    if glob.matches(name) {
                        return Ok(Some(name.clone()));
                    }
                }
                Err(SemverNextError::tag(format!("no tags match '{}'", pattern)))
            }
        }
    }

    fn changelog(&self, tag: Option<&str>, paths: &[String]) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(self.head_oid()?)?;

        if let Some(tag) = tag {
            revwalk.hide(self.resolve_tag(tag)?)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;

            if !paths.is_empty() && !self.touches_paths(&commit, paths)? {
                continue;
            }

            commits.push(Commit::from_message(
                oid.to_string(),
                commit.message().unwrap_or(""),
            ));
        }

        Ok(commits)
    }
}

/// Version-aware tag name ordering: tags that parse as a version after their
/// textual prefix compare as versions and sort above the ones that do not.
fn compare_tag_names(a: &str, b: &str) -> Ordering {
    match (parse_tag_version(a), parse_tag_version(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

fn parse_tag_version(tag: &str) -> Option<Version> {
    let start = tag.find(|c: char| c.is_ascii_digit())?;
    Version::parse(&tag[start..]).ok()
}

// SAFETY: GitRepository wraps git2::Repository and only exposes read
// operations, which go through libgit2's thread-safe object database.
unsafe impl Sync for GitRepository {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_tag_names_orders_versions() {
        assert_eq!(compare_tag_names("v1.9.0", "v1.10.0"), Ordering::Less);
        assert_eq!(compare_tag_names("v2.0.0", "v1.10.0"), Ordering::Greater);
        assert_eq!(compare_tag_names("v1.0.0", "1.0.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_tag_names_versions_beat_plain_names() {
        assert_eq!(compare_tag_names("v1.0.0", "nightly"), Ordering::Greater);
        assert_eq!(compare_tag_names("nightly", "v1.0.0"), Ordering::Less);
        assert_eq!(compare_tag_names("apple", "banana"), Ordering::Less);
    }

    #[test]
    fn test_parse_tag_version_skips_prefix() {
        assert_eq!(parse_tag_version("v1.2.3"), Version::parse("1.2.3").ok());
        assert_eq!(
            parse_tag_version("release-2.0.1"),
            Version::parse("2.0.1").ok()
        );
        assert_eq!(parse_tag_version("nightly"), None);
    }
}

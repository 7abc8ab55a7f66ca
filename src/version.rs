//! Version arithmetic over `semver::Version`
//!
//! Every transformation returns a new value; nothing mutates in place.
//! Increments follow SemVer 2.0.0: bumping resets the lower-order components
//! to zero and clears prerelease and build metadata. Incrementing the patch
//! of a prerelease version only drops the prerelease identifiers without
//! advancing the patch number, since the associated normal version already
//! has higher precedence (https://semver.org/#spec-item-9).

use std::cmp::Ordering;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{Result, SemverNextError};

/// Parse the current version from a tag, stripping the display prefix.
///
/// A missing tag means the repository has never been released and yields
/// `0.0.0`. A tag that does not parse after prefix removal is fatal.
pub fn from_tag(tag: Option<&str>, prefix: &str) -> Result<Version> {
    let tag = match tag {
        Some(tag) if !tag.is_empty() => tag,
        _ => return Ok(Version::new(0, 0, 0)),
    };

    let raw = tag.strip_prefix(prefix).unwrap_or(tag);
    Version::parse(raw).map_err(|e| {
        SemverNextError::version(format!("Tag '{}' is not a semantic version: {}", tag, e))
    })
}

/// Next major version: `X.y.z[-pre][+meta]` -> `(X+1).0.0`
pub fn increment_major(version: &Version) -> Version {
    Version::new(version.major + 1, 0, 0)
}

/// Next minor version: `x.Y.z[-pre][+meta]` -> `x.(Y+1).0`
pub fn increment_minor(version: &Version) -> Version {
    Version::new(version.major, version.minor + 1, 0)
}

/// Next patch version: `x.y.Z[-pre][+meta]` -> `x.y.(Z+1)`
///
/// If the version carries a prerelease, the prerelease is dropped and the
/// patch number stays put.
pub fn increment_patch(version: &Version) -> Version {
    if version.pre.is_empty() {
        Version::new(version.major, version.minor, version.patch + 1)
    } else {
        Version::new(version.major, version.minor, version.patch)
    }
}

/// Copy with the given prerelease string; empty clears it
pub fn with_prerelease(version: &Version, prerelease: &str) -> Result<Version> {
    let pre = if prerelease.is_empty() {
        Prerelease::EMPTY
    } else {
        Prerelease::new(prerelease).map_err(|e| {
            SemverNextError::version(format!("Invalid prerelease '{}': {}", prerelease, e))
        })?
    };

    let mut next = version.clone();
    next.pre = pre;
    Ok(next)
}

/// Copy with the given build metadata; empty clears it
pub fn with_metadata(version: &Version, metadata: &str) -> Result<Version> {
    let build = if metadata.is_empty() {
        BuildMetadata::EMPTY
    } else {
        BuildMetadata::new(metadata).map_err(|e| {
            SemverNextError::version(format!("Invalid build metadata '{}': {}", metadata, e))
        })?
    };

    let mut next = version.clone();
    next.build = build;
    Ok(next)
}

/// Copy with the prerelease stripped, build metadata untouched
pub fn without_prerelease(version: &Version) -> Version {
    let mut next = version.clone();
    next.pre = Prerelease::EMPTY;
    next
}

/// True if `a` has strictly higher SemVer precedence than `b`
///
/// Build metadata never participates in the comparison.
pub fn is_greater(a: &Version, b: &Version) -> bool {
    a.cmp_precedence(b) == Ordering::Greater
}

//! The version-decision engine
//!
//! Ties the git collaborator, the calculator, and the prerelease resolver
//! together into a single stateless evaluation: one call in, one version (or
//! error) out.

use semver::Version;

use crate::calculator::VersionCalculator;
use crate::error::Result;
use crate::git::{Repository, TagMode};
use crate::prerelease;
use crate::version;

/// The requested version operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Derive the bump from the commits since the last tag
    #[default]
    Next,
    /// Unconditionally increment the major version
    Major,
    /// Unconditionally increment the minor version
    Minor,
    /// Unconditionally increment the patch version
    Patch,
    /// Report the current version unchanged
    Current,
    /// Derive the next version, then resolve its prerelease identifier
    PreRelease,
}

/// Configuration for one evaluation
///
/// `prerelease` and `metadata` follow set-if-present semantics: `None` leaves
/// the computed version's field alone, `Some("")` clears it explicitly.
#[derive(Debug, Clone)]
pub struct Options {
    pub action: Action,
    /// Display prefix stripped from tags before parsing (and prepended again
    /// by the caller when formatting)
    pub prefix: String,
    /// Glob restricting which tags are considered
    pub pattern: Option<String>,
    /// Explicit prerelease suffix, e.g. `beta` or `alpha.10`
    pub prerelease: Option<String>,
    /// Build metadata to attach to the result
    pub metadata: Option<String>,
    pub tag_mode: TagMode,
    /// Only commits touching these paths count toward the bump
    pub paths: Vec<String>,
    /// Bump patch even when no qualifying commit was found
    pub always: bool,
    /// Never auto-increment major while the current version is still 0.x
    pub keep_v0: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            action: Action::Next,
            prefix: "v".to_string(),
            pattern: None,
            prerelease: None,
            metadata: None,
            tag_mode: TagMode::CurrentBranch,
            paths: Vec::new(),
            always: false,
            keep_v0: false,
        }
    }
}

/// Compute the version for one evaluation.
///
/// Obtains the latest tag and, when the action calls for it, the commit log
/// since that tag, then applies the calculator and (for the pre-release
/// action) the prerelease resolver. The returned version carries no display
/// prefix; formatting is the caller's concern.
pub fn evaluate<R: Repository>(
    repo: &R,
    calculator: &VersionCalculator,
    opts: &Options,
) -> Result<Version> {
    let tag = repo.describe_tag(opts.tag_mode, opts.pattern.as_deref())?;
    let current = version::from_tag(tag.as_deref(), &opts.prefix)?;
    next_version(repo, calculator, &current, tag.as_deref(), opts)
}

fn next_version<R: Repository>(
    repo: &R,
    calculator: &VersionCalculator,
    current: &Version,
    tag: Option<&str>,
    opts: &Options,
) -> Result<Version> {
    if opts.action == Action::Current {
        return Ok(current.clone());
    }

    // Always-bump re-evaluates from the release base: any prerelease or
    // metadata on the current tag is stripped before bumping.
    let current = if opts.always {
        version::with_metadata(&version::without_prerelease(current), "")?
    } else {
        current.clone()
    };

    let result = match opts.action {
        Action::Next | Action::PreRelease => {
            let log = repo.changelog(tag, &opts.paths)?;
            calculator.find_next(&current, &log, opts)
        }
        Action::Major => version::increment_major(&current),
        Action::Minor => version::increment_minor(&current),
        Action::Patch => version::increment_patch(&current),
        // handled above
        Action::Current => current.clone(),
    };

    let result = if opts.action == Action::PreRelease {
        prerelease::next_prerelease(&current, &result, opts.prerelease.as_deref())?
    } else if let Some(pre) = opts.prerelease.as_deref() {
        version::with_prerelease(&result, pre)?
    } else {
        result
    };

    match opts.metadata.as_deref() {
        Some(metadata) => version::with_metadata(&result, metadata),
        None => Ok(result),
    }
}

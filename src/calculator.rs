//! Next-version selection from a classified commit list

use semver::Version;
use tracing::debug;

use crate::classifier::Classifier;
use crate::engine::Options;
use crate::git::Commit;
use crate::version;

/// Chooses the next version from the current version and the commits since
/// the last release, using the classifier's change kinds.
pub struct VersionCalculator {
    classifier: Classifier,
}

impl VersionCalculator {
    /// Create a calculator over the given classification table
    pub fn new(classifier: Classifier) -> Self {
        VersionCalculator { classifier }
    }

    /// Select the next version for an ordered (newest-first) commit list.
    ///
    /// The scan stops at the first breaking commit: nothing older can lower
    /// the bump below major. While scanning, the first feature and the first
    /// patch commit are each recorded once; the decision then follows strict
    /// precedence (breaking > feature > patch > `always` > no change). A
    /// breaking change on a 0.x version bumps minor instead of major when
    /// `keep_v0` is set.
    pub fn find_next(&self, current: &Version, commits: &[Commit], opts: &Options) -> Version {
        let mut breaking: Option<&Commit> = None;
        let mut feature: Option<&Commit> = None;
        let mut patch: Option<&Commit> = None;

        for commit in commits {
            if self.classifier.is_breaking(commit) {
                // No bigger change allowed, so we're done.
                breaking = Some(commit);
                break;
            }

            if feature.is_none() && self.classifier.is_feature(commit) {
                feature = Some(commit);
            }

            if patch.is_none() && self.classifier.is_patch(commit) {
                patch = Some(commit);
            }
        }

        if let Some(commit) = breaking {
            if current.major == 0 && opts.keep_v0 {
                debug!(sha = %commit.sha, title = %commit.title, "found major change, but keep-v0 is set");
                return version::increment_minor(current);
            }
            debug!(sha = %commit.sha, title = %commit.title, "found major change");
            return version::increment_major(current);
        }

        if let Some(commit) = feature {
            debug!(sha = %commit.sha, title = %commit.title, "found minor change");
            return version::increment_minor(current);
        }

        if let Some(commit) = patch {
            debug!(sha = %commit.sha, title = %commit.title, "found patch change");
            return version::increment_patch(current);
        }

        if opts.always {
            debug!("found no changes, but always-bump is set");
            return version::increment_patch(current);
        }

        current.clone()
    }
}

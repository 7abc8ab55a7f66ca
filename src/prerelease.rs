//! Pre-release identifier resolution
//!
//! Computes the `name.counter` prerelease for the pre-release action, given
//! the current version, the base next version already selected by the
//! calculator, and an optional explicitly requested suffix.

use semver::Version;

use crate::error::{Result, SemverNextError};
use crate::version;

/// Resolve the prerelease for `next`.
///
/// Suffix selection: an explicit request whose last dot-separated segment is
/// an integer pins the prerelease verbatim on `current`. Otherwise the
/// requested suffix is used, except that a request matching `current`'s
/// prerelease name continues `current`'s full suffix so the counter keeps
/// counting. With no request, `current`'s existing prerelease is continued;
/// if there is none either, no suffix is determinable and resolution fails.
///
/// When `current` is a normal release and `next` does not exceed it, `next`
/// is first promoted to `current`'s next patch, so a prerelease cut from a
/// clean release always targets a genuinely new version. If `next` still does
/// not exceed `current`'s base, the same channel is being continued and the
/// counter increments; a strictly greater `next` resets the counter to zero.
pub fn next_prerelease(
    current: &Version,
    next: &Version,
    requested: Option<&str>,
) -> Result<Version> {
    let suffix = match requested {
        Some(requested) if !requested.is_empty() => {
            // A suffix that already ends in a number is an explicit pin; use
            // it as-is with no counter arithmetic.
            let parts: Vec<&str> = requested.split('.').collect();
            if parts.len() > 1 && parts[parts.len() - 1].parse::<i64>().is_ok() {
                return version::with_prerelease(current, requested);
            }

            let current_name = current.pre.as_str().split('.').next().unwrap_or("");
            if current_name == requested {
                // Same channel: keep the full current suffix so the counter
                // continues instead of resetting.
                current.pre.as_str().to_string()
            } else {
                requested.to_string()
            }
        }
        _ if !current.pre.is_empty() => current.pre.as_str().to_string(),
        _ => return Err(SemverNextError::prerelease_suffix(current)),
    };

    let parts: Vec<&str> = suffix.split('.').collect();
    let mut name = parts[0];
    let mut counter: i64 = 0;

    let current_base = version::without_prerelease(current);

    // A prerelease cut from a clean release must target the next version,
    // not re-tag the current one.
    let mut next = next.clone();
    if current.pre.is_empty() && !version::is_greater(&next, &current_base) {
        next = version::increment_patch(current);
    }

    if !version::is_greater(&next, &current_base) {
        counter = -1;
        if parts.len() == 2 {
            name = parts[0];
            counter = parts[1].parse().unwrap_or(0);
        } else if parts.len() > 2 {
            name = parts[parts.len() - 1];
        }
        counter += 1;
    }

    version::with_prerelease(&next, &format!("{}.{}", name, counter))
}

//! Structured output for the CLI's `--json` mode

use semver::Version;
use serde::Serialize;

/// Version broken into its components for machine consumption.
///
/// The prerelease string is split on its first dot into `prerelease` (the
/// channel name) and `build` (the counter); empty fields are omitted from the
/// serialized form.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prerelease: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub build: String,
}

impl VersionInfo {
    /// Assemble the payload for a computed version and its display prefix
    pub fn new(version: &Version, prefix: &str) -> Self {
        let (prerelease, build) = match version.pre.as_str().split_once('.') {
            Some((name, counter)) => (name.to_string(), counter.to_string()),
            None => (version.pre.as_str().to_string(), String::new()),
        };

        VersionInfo {
            version: format!("{}{}", prefix, version),
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prefix: prefix.to_string(),
            metadata: version.build.as_str().to_string(),
            prerelease,
            build,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_plain_version_omits_empty_fields() {
        let info = VersionInfo::new(&v("1.2.3"), "");
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"version":"1.2.3","major":1,"minor":2,"patch":3}"#);
    }

    #[test]
    fn test_prefix_is_part_of_the_full_version_string() {
        let info = VersionInfo::new(&v("1.2.3"), "v");
        assert_eq!(info.version, "v1.2.3");
        assert_eq!(info.prefix, "v");
    }

    #[test]
    fn test_prerelease_splits_into_name_and_counter() {
        let info = VersionInfo::new(&v("1.2.3-alpha.5+build.43"), "v");
        assert_eq!(info.version, "v1.2.3-alpha.5+build.43");
        assert_eq!(info.prerelease, "alpha");
        assert_eq!(info.build, "5");
        assert_eq!(info.metadata, "build.43");
    }

    #[test]
    fn test_uncounted_prerelease_has_no_build() {
        let info = VersionInfo::new(&v("1.2.3-beta"), "v");
        assert_eq!(info.prerelease, "beta");
        assert_eq!(info.build, "");
    }
}

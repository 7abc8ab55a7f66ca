use thiserror::Error;

/// Unified error type for semver-next operations
#[derive(Error, Debug)]
pub enum SemverNextError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error(
        "pre-release suffix is required to calculate the next pre-release version \
         as a suffix could not be determined from the current version: {current}"
    )]
    PrereleaseSuffix { current: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-next
pub type Result<T> = std::result::Result<T, SemverNextError>;

impl SemverNextError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverNextError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemverNextError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        SemverNextError::Tag(msg.into())
    }

    /// Create a prerelease-suffix error carrying the offending current version
    pub fn prerelease_suffix(current: &semver::Version) -> Self {
        SemverNextError::PrereleaseSuffix {
            current: current.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SemverNextError};

/// Represents the complete configuration for semver-next.
///
/// Currently this is the commit-type taxonomy fed into the classifier; the
/// rest of an evaluation is configured per-invocation through CLI flags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub commit_types: CommitTypesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            commit_types: CommitTypesConfig::default(),
        }
    }
}

/// Returns the default list of commit types that bump the minor version.
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default list of commit types that bump the patch version.
fn default_fix_types() -> Vec<String> {
    vec!["fix".to_string()]
}

/// The commit types recognized as features and fixes.
///
/// Extending these lists lets additional conventional-commit type prefixes
/// count toward a bump, e.g. `feature_types = ["feat", "change"]` or
/// `fix_types = ["fix", "perf"]`. Breaking-change detection is not
/// configurable: any type with a `!` marker or a breaking-change footer
/// qualifies.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CommitTypesConfig {
    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_fix_types")]
    pub fix_types: Vec<String>,
}

impl Default for CommitTypesConfig {
    fn default() -> Self {
        CommitTypesConfig {
            feature_types: default_feature_types(),
            fix_types: default_fix_types(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semvernext.toml` in current directory
/// 3. `~/.config/.semvernext.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./semvernext.toml").exists() {
        fs::read_to_string("./semvernext.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".semvernext.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| SemverNextError::config(format!("Invalid configuration file: {}", e)))
}

// tests/engine_test.rs
use semver::Version;
use semver_next::calculator::VersionCalculator;
use semver_next::classifier::Classifier;
use semver_next::config::{self, CommitTypesConfig, Config};
use semver_next::engine::{evaluate, Action, Options};
use semver_next::git::MockRepository;
use semver_next::output::VersionInfo;
use semver_next::SemverNextError;
use serial_test::serial;
use std::env;
use std::fs;

fn calculator_for(config: &Config) -> VersionCalculator {
    VersionCalculator::new(Classifier::new(&config.commit_types).unwrap())
}

fn calculator() -> VersionCalculator {
    calculator_for(&Config::default())
}

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn test_non_qualifying_commits_leave_version_unchanged() {
    for tag in ["v0.4.5", "v1.2.3", "v2.0.0-rc.1"] {
        let mut repo = MockRepository::new();
        repo.set_tag(tag);
        repo.add_commit_message("a1", "chore: bump deps");
        repo.add_commit_message("a2", "docs: update readme");
        repo.add_commit_message("a3", "Merge remote-tracking branch 'origin/main'");

        let got = evaluate(&repo, &calculator(), &Options::default()).unwrap();
        assert_eq!(format!("v{}", got), tag, "expected {} to stay put", tag);
    }
}

#[test]
fn test_bump_levels_from_commit_kinds() {
    let cases = [
        ("v0.4.5", "fix: y", "0.4.6"),
        ("v0.4.5", "feat: y", "0.5.0"),
        ("v0.5.5", "feat!: y", "1.0.0"),
        ("v1.2.3", "chore!: y", "2.0.0"),
    ];

    for (tag, message, expected) in cases {
        let mut repo = MockRepository::new();
        repo.set_tag(tag);
        repo.add_commit_message("a1", message);

        let got = evaluate(&repo, &calculator(), &Options::default()).unwrap();
        assert_eq!(got, v(expected), "{} + '{}'", tag, message);
    }
}

#[test]
fn test_breaking_footer_bumps_major_without_title_bang() {
    let mut repo = MockRepository::new();
    repo.set_tag("v2.4.12");
    repo.add_commit_message("a1", "feat: x\n\nBREAKING CHANGE: y");

    let got = evaluate(&repo, &calculator(), &Options::default()).unwrap();
    assert_eq!(got, v("3.0.0"));
}

#[test]
fn test_breaking_beats_earlier_feature_and_patch_commits() {
    let mut repo = MockRepository::new();
    repo.set_tag("v1.2.3");
    repo.add_commit_message("a1", "feat: a");
    repo.add_commit_message("a2", "fix: b");
    repo.add_commit_message("a3", "feat!: c");

    let got = evaluate(&repo, &calculator(), &Options::default()).unwrap();
    assert_eq!(got, v("2.0.0"));
}

#[test]
fn test_keep_v0_turns_breaking_into_minor() {
    let mut repo = MockRepository::new();
    repo.set_tag("v0.5.5");
    repo.add_commit_message("a1", "feat!: y");

    let opts = Options {
        keep_v0: true,
        ..Options::default()
    };
    let got = evaluate(&repo, &calculator(), &opts).unwrap();
    assert_eq!(got, v("0.6.0"));
}

#[test]
fn test_configured_fix_types_extend_patch_detection() {
    let config = Config {
        commit_types: CommitTypesConfig {
            feature_types: vec!["feat".to_string()],
            fix_types: vec!["fix".to_string(), "perf".to_string()],
        },
    };

    let mut repo = MockRepository::new();
    repo.set_tag("v0.4.5");
    repo.add_commit_message("a1", "perf: faster walk");

    let got = evaluate(&repo, &calculator_for(&config), &Options::default()).unwrap();
    assert_eq!(got, v("0.4.6"));
}

#[test]
fn test_prerelease_error_names_the_current_version() {
    let mut repo = MockRepository::new();
    repo.set_tag("v1.2.3");
    repo.add_commit_message("a1", "feat: x");

    let opts = Options {
        action: Action::PreRelease,
        ..Options::default()
    };
    let err = evaluate(&repo, &calculator(), &opts).unwrap_err();
    assert!(matches!(err, SemverNextError::PrereleaseSuffix { .. }));
    assert!(err.to_string().contains("1.2.3"));
}

#[test]
fn test_result_round_trips_through_formatting() {
    let mut repo = MockRepository::new();
    repo.set_tag("v1.2.3-alpha.11");
    repo.add_commit_message("a1", "fix: y");

    let opts = Options {
        action: Action::PreRelease,
        metadata: Some("build.7".to_string()),
        ..Options::default()
    };
    let got = evaluate(&repo, &calculator(), &opts).unwrap();

    let formatted = format!("v{}", got);
    let reparsed = Version::parse(formatted.strip_prefix('v').unwrap()).unwrap();
    assert_eq!(got, reparsed);
    assert_eq!(reparsed.to_string(), "1.2.3-alpha.12+build.7");
}

#[test]
fn test_json_payload_for_computed_version() {
    let mut repo = MockRepository::new();
    repo.set_tag("v1.2.3-alpha.11");
    repo.add_commit_message("a1", "fix: y");

    let opts = Options {
        action: Action::PreRelease,
        ..Options::default()
    };
    let got = evaluate(&repo, &calculator(), &opts).unwrap();

    let info = VersionInfo::new(&got, "v");
    let json = serde_json::to_string(&info).unwrap();
    assert_eq!(
        json,
        r#"{"version":"v1.2.3-alpha.12","major":1,"minor":2,"patch":3,"prefix":"v","prerelease":"alpha","build":"12"}"#
    );
}

#[test]
#[serial]
fn test_load_config_discovers_file_in_cwd() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("semvernext.toml"),
        "[commit_types]\nfix_types = [\"fix\", \"perf\"]\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let config = config::load_config(None);
    env::set_current_dir(original).unwrap();

    assert_eq!(
        config.unwrap().commit_types.fix_types,
        vec!["fix", "perf"]
    );
}

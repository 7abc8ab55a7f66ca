//! Conventional-commit classification
//!
//! Classifies a single commit as breaking, feature, or patch from its title
//! and body. Matchers are compiled once from the configured commit-type
//! taxonomy into an immutable [Classifier]; there is no module-level pattern
//! state.

use regex::Regex;

use crate::config::CommitTypesConfig;
use crate::error::{Result, SemverNextError};
use crate::git::Commit;

/// The kind of change a commit carries, ordered by precedence (highest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Breaking,
    Feature,
    Patch,
}

/// Which part of the commit message a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Title,
    Body,
}

/// One `(kind, matcher)` pair of the classification table
#[derive(Debug, Clone)]
struct Rule {
    kind: ChangeKind,
    target: Target,
    pattern: Regex,
}

impl Rule {
    fn is_match(&self, commit: &Commit) -> bool {
        match self.target {
            Target::Title => self.pattern.is_match(&commit.title),
            Target::Body => self.pattern.is_match(&commit.body),
        }
    }
}

/// Classifies commits against an ordered rule list
///
/// Rules are checked in precedence order: the breaking-change footer, the
/// `type(scope)!:` header marker, then the configured feature and fix type
/// headers. The predicates themselves are independent and non-exclusive; only
/// [Classifier::classify] applies precedence.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Compile the classification table for the given commit-type taxonomy
    pub fn new(types: &CommitTypesConfig) -> Result<Self> {
        let mut rules = vec![
            // A footer line `BREAKING CHANGE:` or `BREAKING-CHANGE:` at line
            // start. Underscore variants do not qualify.
            Rule {
                kind: ChangeKind::Breaking,
                target: Target::Body,
                pattern: compile(r"(?im)^BREAKING[ -]CHANGE:")?,
            },
            // `type!:` or `type(scope)!:` with the bang right before the
            // colon. Any commit type qualifies.
            Rule {
                kind: ChangeKind::Breaking,
                target: Target::Title,
                pattern: compile(r"(?i)\w+(\([^)]*\))?!:")?,
            },
        ];

        if let Some(pattern) = header_pattern(&types.feature_types) {
            rules.push(Rule {
                kind: ChangeKind::Feature,
                target: Target::Title,
                pattern: compile(&pattern)?,
            });
        }

        if let Some(pattern) = header_pattern(&types.fix_types) {
            rules.push(Rule {
                kind: ChangeKind::Patch,
                target: Target::Title,
                pattern: compile(&pattern)?,
            });
        }

        Ok(Classifier { rules })
    }

    /// True if the commit carries a breaking change
    pub fn is_breaking(&self, commit: &Commit) -> bool {
        self.matches(ChangeKind::Breaking, commit)
    }

    /// True if the commit title is a feature header
    pub fn is_feature(&self, commit: &Commit) -> bool {
        self.matches(ChangeKind::Feature, commit)
    }

    /// True if the commit title is a fix header
    pub fn is_patch(&self, commit: &Commit) -> bool {
        self.matches(ChangeKind::Patch, commit)
    }

    /// The highest-precedence change kind this commit matches, if any
    pub fn classify(&self, commit: &Commit) -> Option<ChangeKind> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(commit))
            .map(|rule| rule.kind)
    }

    fn matches(&self, kind: ChangeKind, commit: &Commit) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.kind == kind)
            .any(|rule| rule.is_match(commit))
    }
}

/// Header pattern for a list of commit types, e.g. `feat:` / `feat(scope):`
fn header_pattern(types: &[String]) -> Option<String> {
    if types.is_empty() {
        return None;
    }
    let alternation = types
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!(r"(?i)(?:{})(\([^)]*\))?:", alternation))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| SemverNextError::config(format!("Invalid commit-type pattern: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommitTypesConfig;

    fn classifier() -> Classifier {
        Classifier::new(&CommitTypesConfig::default()).unwrap()
    }

    fn commit(title: &str, body: &str) -> Commit {
        Commit {
            sha: "deadbeef".to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_is_breaking() {
        let c = classifier();
        for case in [
            commit("feat!: foo", ""),
            commit("chore(lala)!: foo", ""),
            commit("docs: lalala", "BREAKING CHANGE: lalal"),
            commit("docs: lalala", "BREAKING-CHANGE: lalal"),
        ] {
            assert!(c.is_breaking(&case), "should be breaking: {}", case);
        }

        for case in [
            commit("feat: foo", ""),
            commit("chore(lol): foo", ""),
            commit("docs: lalala", ""),
            commit("docs: BREAKING change: lalal", ""),
            commit("docs: breaking-change: aehijhk", ""),
            commit("docs: foo", "BREAKING_CHANGE: no underscore variant"),
        ] {
            assert!(!c.is_breaking(&case), "should NOT be breaking: {}", case);
        }
    }

    #[test]
    fn test_breaking_footer_is_case_insensitive() {
        let c = classifier();
        assert!(c.is_breaking(&commit("docs: foo", "breaking change: lowered")));
    }

    #[test]
    fn test_breaking_footer_must_start_a_line() {
        let c = classifier();
        assert!(c.is_breaking(&commit("docs: foo", "intro\nBREAKING CHANGE: here")));
        assert!(!c.is_breaking(&commit("docs: foo", "mentions a BREAKING CHANGE: inline")));
    }

    #[test]
    fn test_is_feature() {
        let c = classifier();
        for case in [commit("feat: foo", ""), commit("feat(lalal): foobar", "")] {
            assert!(c.is_feature(&case), "should be a feature: {}", case);
        }

        for case in [
            commit("fix: foo", ""),
            commit("chore: foo", ""),
            commit("docs: lalala", ""),
            commit("ci: foo", ""),
            commit("test: foo", ""),
            commit("Merge remote-tracking branch 'origin/main'", ""),
            commit("refactor: foo bar", ""),
        ] {
            assert!(!c.is_feature(&case), "should NOT be a feature: {}", case);
        }
    }

    #[test]
    fn test_is_patch() {
        let c = classifier();
        for case in [commit("fix: foo", ""), commit("fix(lalal): lalala", "")] {
            assert!(c.is_patch(&case), "should be a patch: {}", case);
        }

        for case in [
            commit("chore: foobar", ""),
            commit("docs: something", ""),
            commit("invalid commit", ""),
        ] {
            assert!(!c.is_patch(&case), "should NOT be a patch: {}", case);
        }
    }

    #[test]
    fn test_bang_header_is_not_a_feature() {
        // `feat!:` counts only as breaking; the feature header needs the
        // colon right after the type or scope.
        let c = classifier();
        let case = commit("feat!: redo everything", "");
        assert!(c.is_breaking(&case));
        assert!(!c.is_feature(&case));
    }

    #[test]
    fn test_classify_applies_precedence() {
        let c = classifier();
        assert_eq!(
            c.classify(&commit("feat!: foo", "")),
            Some(ChangeKind::Breaking)
        );
        assert_eq!(
            c.classify(&commit("feat: foo", "BREAKING CHANGE: bar")),
            Some(ChangeKind::Breaking)
        );
        assert_eq!(c.classify(&commit("feat: foo", "")), Some(ChangeKind::Feature));
        assert_eq!(c.classify(&commit("fix: foo", "")), Some(ChangeKind::Patch));
        assert_eq!(c.classify(&commit("chore: foo", "")), None);
    }

    #[test]
    fn test_configured_additional_types() {
        let types = CommitTypesConfig {
            feature_types: vec!["feat".to_string(), "change".to_string()],
            fix_types: vec!["fix".to_string(), "perf".to_string()],
        };
        let c = Classifier::new(&types).unwrap();

        assert!(c.is_feature(&commit("change: new flow", "")));
        assert!(c.is_patch(&commit("perf(core): faster scan", "")));
        assert!(!c.is_feature(&commit("perf: faster scan", "")));
    }

    #[test]
    fn test_empty_type_list_matches_nothing() {
        let types = CommitTypesConfig {
            feature_types: vec![],
            fix_types: vec!["fix".to_string()],
        };
        let c = Classifier::new(&types).unwrap();

        assert!(!c.is_feature(&commit("feat: foo", "")));
        assert!(c.is_patch(&commit("fix: foo", "")));
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Badge assignment strategies.
//!
//! A [`BadgeAssigner`] maps a contributor and its rank to the badges shown
//! next to it. The strategy is chosen once when the generator is configured:
//! [`DefaultBadgeAssigner`] awards a single "Top Contributor" badge,
//! [`RuleBadgeAssigner`] evaluates rules loaded from a YAML file, and any
//! closure with the matching signature can be supplied directly.

use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    contributor::Contributor,
    error::{self, Error}
};

/// Label of the badge awarded by [`DefaultBadgeAssigner`].
pub const DEFAULT_BADGE_LABEL: &str = "Top Contributor";

/// Color of the badge awarded by [`DefaultBadgeAssigner`].
pub const DEFAULT_BADGE_COLOR: &str = "#2ea44f";

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#(?:[0-9A-Fa-f]{3,4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})|[A-Za-z]+)$")
        .expect("valid color pattern")
});

/// Short label rendered as a chip next to a contributor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge {
    /// Display text.
    pub label: String,
    /// CSS color name or hex color used as the chip background.
    pub color: String
}

impl Badge {
    /// Creates a badge from a label and a color.
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into()
        }
    }
}

/// Strategy deciding which badges a contributor receives.
///
/// `rank` is the 1-based position in the leaderboard when known.
pub trait BadgeAssigner: Send + Sync {
    /// Returns the badges for `contributor` in display order.
    fn assign(&self, contributor: &Contributor, rank: Option<usize>) -> Vec<Badge>;
}

impl<F> BadgeAssigner for F
where
    F: Fn(&Contributor, Option<usize>) -> Vec<Badge> + Send + Sync
{
    fn assign(&self, contributor: &Contributor, rank: Option<usize>) -> Vec<Badge> {
        self(contributor, rank)
    }
}

/// Awards every contributor the same "Top Contributor" badge.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBadgeAssigner;

impl BadgeAssigner for DefaultBadgeAssigner {
    fn assign(&self, _contributor: &Contributor, _rank: Option<usize>) -> Vec<Badge> {
        vec![Badge::new(DEFAULT_BADGE_LABEL, DEFAULT_BADGE_COLOR)]
    }
}

/// Single entry of a badge rule file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BadgeRule {
    /// Badge label.
    pub label:       String,
    /// Badge color.
    pub color:       String,
    /// Minimum contribution count required for the badge.
    #[serde(default)]
    pub min_commits: Option<u64>,
    /// Worst leaderboard rank (1-based, inclusive) that still earns the
    /// badge. Contributors with an unknown rank never match.
    #[serde(default)]
    pub max_rank:    Option<usize>
}

impl BadgeRule {
    fn matches(&self, contributor: &Contributor, rank: Option<usize>) -> bool {
        let commits_ok = self
            .min_commits
            .is_none_or(|minimum| contributor.commit_count() >= minimum);
        let rank_ok = match self.max_rank {
            Some(limit) => rank.is_some_and(|position| position <= limit),
            None => true
        };

        commits_ok && rank_ok
    }

    fn validate(&self, index: usize) -> Result<(), Error> {
        if self.label.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "badge rule #{} must have a non-empty label",
                index + 1
            )));
        }
        if !COLOR_PATTERN.is_match(self.color.trim()) {
            return Err(Error::invalid_input(format!(
                "badge rule #{} has unsupported color '{}'",
                index + 1,
                self.color
            )));
        }
        if self.max_rank == Some(0) {
            return Err(Error::invalid_input(format!(
                "badge rule #{} must use a max_rank of at least 1",
                index + 1
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BadgeRuleFile {
    #[serde(default)]
    rules: Vec<BadgeRule>
}

/// Assigns every badge whose rule the contributor satisfies, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBadgeAssigner {
    rules: Vec<BadgeRule>
}

impl RuleBadgeAssigner {
    /// Builds an assigner from already validated rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the list is empty or a rule is
    /// malformed.
    pub fn new(rules: Vec<BadgeRule>) -> Result<Self, Error> {
        if rules.is_empty() {
            return Err(Error::invalid_input("badge rules must include at least one rule"));
        }
        for (index, rule) in rules.iter().enumerate() {
            rule.validate(index)?;
        }

        Ok(Self {
            rules
        })
    }

    /// Rules evaluated by this assigner.
    pub fn rules(&self) -> &[BadgeRule] {
        &self.rules
    }
}

impl BadgeAssigner for RuleBadgeAssigner {
    fn assign(&self, contributor: &Contributor, rank: Option<usize>) -> Vec<Badge> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(contributor, rank))
            .map(|rule| Badge::new(rule.label.trim(), rule.color.trim()))
            .collect()
    }
}

/// Loads badge rules from the YAML file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`] when
/// it is not valid YAML and [`Error::InvalidInput`] when a rule is malformed.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use contrib::load_badge_rules;
///
/// # fn main() -> Result<(), contrib::Error> {
/// let assigner = load_badge_rules(Path::new("badges.yaml"))?;
/// println!("{} rules loaded", assigner.rules().len());
/// # Ok(())
/// # }
/// ```
pub fn load_badge_rules(path: &Path) -> Result<RuleBadgeAssigner, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_badge_rules(&contents)
}

/// Parses badge rules from a YAML document.
///
/// ```
/// use contrib::{BadgeAssigner, Contributor, parse_badge_rules};
///
/// let yaml = r##"
/// rules:
///   - label: Maintainer
///     color: "#6f42c1"
///     max_rank: 1
/// "##;
/// let assigner = parse_badge_rules(yaml).expect("valid rules");
/// let lead = Contributor::new("octocat", "", 10);
/// assert_eq!(assigner.assign(&lead, Some(1)).len(), 1);
/// assert!(assigner.assign(&lead, Some(2)).is_empty());
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed YAML and [`Error::InvalidInput`]
/// when the rules violate their invariants.
pub fn parse_badge_rules(contents: &str) -> Result<RuleBadgeAssigner, Error> {
    let file: BadgeRuleFile = serde_yaml::from_str(contents)?;
    RuleBadgeAssigner::new(file.rules)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn contributor(commits: u64) -> Contributor {
        Contributor::new("octocat", "https://example.com/octocat.png", commits)
    }

    #[test]
    fn default_assigner_awards_top_contributor() {
        let badges = DefaultBadgeAssigner.assign(&contributor(1), None);
        assert_eq!(badges, vec![Badge::new("Top Contributor", "#2ea44f")]);
    }

    #[test]
    fn closures_act_as_assigners() {
        let assigner = |contributor: &Contributor, rank: Option<usize>| {
            vec![Badge::new(
                format!("#{} {}", rank.unwrap_or(0), contributor.login()),
                "blue"
            )]
        };
        let boxed: Box<dyn BadgeAssigner> = Box::new(assigner);

        let badges = boxed.assign(&contributor(3), Some(2));
        assert_eq!(badges[0].label, "#2 octocat");
    }

    #[test]
    fn rules_are_applied_in_file_order() {
        let yaml = r##"
rules:
  - label: Veteran
    color: "#0a3069"
    min_commits: 100
  - label: Podium
    color: gold
    max_rank: 3
  - label: Contributor
    color: "#abc"
"##;
        let assigner = parse_badge_rules(yaml).expect("valid rules");

        let labels = |commits, rank| {
            assigner
                .assign(&contributor(commits), rank)
                .into_iter()
                .map(|badge| badge.label)
                .collect::<Vec<_>>()
        };

        assert_eq!(labels(150, Some(1)), ["Veteran", "Podium", "Contributor"]);
        assert_eq!(labels(50, Some(4)), ["Contributor"]);
        assert_eq!(labels(50, None), ["Contributor"]);
    }

    #[test]
    fn rejects_empty_rule_list() {
        let error = parse_badge_rules("rules: []").expect_err("expected rejection");
        assert!(matches!(error, Error::InvalidInput { .. }));
    }

    #[test]
    fn rejects_invalid_color() {
        let yaml = r#"
rules:
  - label: Broken
    color: "red\" onload=\"x"
"#;
        let error = parse_badge_rules(yaml).expect_err("expected rejection");
        match error {
            Error::InvalidInput {
                message
            } => assert!(message.contains("unsupported color")),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn rejects_blank_label_and_zero_rank() {
        assert!(parse_badge_rules("rules:\n  - label: ' '\n    color: red\n").is_err());
        assert!(
            parse_badge_rules("rules:\n  - label: A\n    color: red\n    max_rank: 0\n").is_err()
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = parse_badge_rules("rules:\n  - label: A\n    color: red\n    shape: star\n")
            .expect_err("expected parse failure");
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn load_badge_rules_reads_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "rules:\n  - label: Star\n    color: '#ffd33d'").expect("write failed");

        let assigner = load_badge_rules(file.path()).expect("expected rules to load");
        assert_eq!(assigner.rules().len(), 1);
    }

    #[test]
    fn load_badge_rules_reports_missing_file() {
        let error = load_badge_rules(Path::new("/nonexistent/badges.yaml"))
            .expect_err("expected io failure");
        assert!(matches!(error, Error::Io { .. }));
    }
}

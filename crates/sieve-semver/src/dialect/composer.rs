//! Composer (PHP) notation

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use super::{Dialect, DialectKind};
use crate::config::SieveConfig;
use crate::error::Result;

/// Version Composer assigns to default development branches
const DEFAULT_BRANCH_VERSION: &str = "9999999.0.0";

/// Segment substituted for `x` in branch versions
const BRANCH_SEGMENT: &str = "9999999";

const DEFAULT_BRANCHES: &[&str] = &["dev-master", "dev-main", "dev-trunk", "dev-default"];

lazy_static! {
    // OR constraint splitter, `|` and `||`
    static ref OR_CONSTRAINT_RE: Regex = Regex::new(r"\s*\|\|?\s*").unwrap();

    // AND constraint separator, commas with optional spacing
    static ref AND_CONSTRAINT_RE: Regex = Regex::new(r"\s*,\s*").unwrap();

    // Leading operator of a single constraint token
    static ref OPERATOR_RE: Regex = Regex::new(r"^(<>|!=|>=?|<=?|==?|\^|~)?(.*)$").unwrap();

    // Stability flag in constraint
    static ref CONSTRAINT_STABILITY_RE: Regex = Regex::new(r"(?i)^([^,\s]*?)@(stable|RC|beta|alpha|dev)$").unwrap();

    // Reference on dev version
    static ref CONSTRAINT_REF_RE: Regex = Regex::new(r"(?i)^(dev-[^,\s@]+?|[^,\s@]+?\.x-dev)#.+$").unwrap();

    // Branch alias such as `1.2.x-dev`
    static ref X_DEV_RE: Regex = Regex::new(r"(?i)^(v?[0-9]+(?:\.[0-9]+)*)\.x-dev$").unwrap();

    // Tilde operand with only major and minor given
    static ref TWO_SEGMENT_RE: Regex = Regex::new(r"^v?([0-9]+)\.[0-9]+(?:[-+].*)?$").unwrap();

    // Four numeric segments where the last one is zero
    static ref FOURTH_SEGMENT_RE: Regex = Regex::new(r"^(v?[0-9]+\.[0-9]+\.[0-9]+)\.0+([-+].*)?$").unwrap();
}

/// Composer constraints: `,` for AND, `|` for OR, stability flags and
/// development branches
#[derive(Debug, Clone)]
pub struct ComposerDialect {
    config: SieveConfig,
}

impl ComposerDialect {
    pub fn new() -> Self {
        let mut config = SieveConfig::default().with_case_insensitive(true);
        config
            .operator_aliases
            .insert("<>".to_string(), "!=".to_string());
        ComposerDialect { config }
    }
}

impl Default for ComposerDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for ComposerDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Composer
    }

    fn config(&self) -> &SieveConfig {
        &self.config
    }

    fn normalize_version<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let version = strip_reference(input.trim());
        if is_default_branch(version) {
            return Ok(Cow::Borrowed(DEFAULT_BRANCH_VERSION));
        }
        if let Some(caps) = X_DEV_RE.captures(version) {
            return Ok(Cow::Owned(branch_version(&caps[1])));
        }
        Ok(Cow::Owned(drop_fourth_segment(version)))
    }

    fn normalize_range<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let clauses: Vec<String> = OR_CONSTRAINT_RE
            .split(input.trim())
            .map(normalize_clause)
            .collect();
        Ok(Cow::Owned(clauses.join(" || ")))
    }
}

fn normalize_clause(clause: &str) -> String {
    AND_CONSTRAINT_RE
        .replace_all(clause, " ")
        .split_whitespace()
        .map(normalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_token(token: &str) -> String {
    let (operator, operand) = match OPERATOR_RE.captures(token) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => ("", token),
    };
    if operand.is_empty() {
        return token.to_string();
    }

    let operand = match CONSTRAINT_STABILITY_RE.captures(operand) {
        Some(caps) if caps[1].is_empty() => "*",
        Some(caps) => caps.get(1).map_or(operand, |m| m.as_str()),
        None => operand,
    };
    let operand = strip_reference(operand);

    let operand = if is_default_branch(operand) {
        DEFAULT_BRANCH_VERSION.to_string()
    } else if let Some(caps) = X_DEV_RE.captures(operand) {
        format!("{}.x", &caps[1])
    } else {
        drop_fourth_segment(operand)
    };
    if operator == "~" {
        if let Some(upper) = next_major(&operand) {
            return format!(">={} <{}.0.0-0", operand, upper);
        }
    }
    format!("{}{}", operator, operand)
}

/// `~1.2` allows every later minor of major 1, unlike `~1.2.3`
fn next_major(operand: &str) -> Option<u64> {
    let caps = TWO_SEGMENT_RE.captures(operand)?;
    caps[1].parse::<u64>().ok()?.checked_add(1)
}

fn strip_reference(version: &str) -> &str {
    match CONSTRAINT_REF_RE.captures(version) {
        Some(caps) => caps.get(1).map_or(version, |m| m.as_str()),
        None => version,
    }
}

fn is_default_branch(version: &str) -> bool {
    DEFAULT_BRANCHES
        .iter()
        .any(|branch| branch.eq_ignore_ascii_case(version))
}

/// `1.2` from `1.2.x-dev` becomes `1.2.9999999-dev`
fn branch_version(prefix: &str) -> String {
    let mut segments: Vec<&str> = prefix.split('.').collect();
    while segments.len() < 3 {
        segments.push(BRANCH_SEGMENT);
    }
    format!("{}-dev", segments.join("."))
}

fn drop_fourth_segment(version: &str) -> String {
    match FOURTH_SEGMENT_RE.captures(version) {
        Some(caps) => format!(
            "{}{}",
            &caps[1],
            caps.get(2).map_or("", |m| m.as_str())
        ),
        None => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized_range(input: &str) -> String {
        ComposerDialect::new().normalize_range(input).unwrap().into_owned()
    }

    fn normalized_version(input: &str) -> String {
        ComposerDialect::new().normalize_version(input).unwrap().into_owned()
    }

    #[test]
    fn test_separators() {
        assert_eq!(normalized_range(">=1.0,<2.0"), ">=1.0 <2.0");
        assert_eq!(normalized_range(">=1.0 , <2.0"), ">=1.0 <2.0");
        assert_eq!(normalized_range("^1.0|^2.0"), "^1.0 || ^2.0");
        assert_eq!(normalized_range("^1.0 || ^2.0"), "^1.0 || ^2.0");
        assert_eq!(normalized_range("1.0 - 2.0"), "1.0 - 2.0");
    }

    #[test]
    fn test_stability_flags_and_references() {
        assert_eq!(normalized_range("^1.2@beta"), "^1.2");
        assert_eq!(normalized_range("@dev"), "*");
        assert_eq!(normalized_range("dev-master#abc123"), "9999999.0.0");
        assert_eq!(normalized_range("1.2.x-dev#abc123"), "1.2.x");
        assert_eq!(normalized_range(">=1.0.0.0"), ">=1.0.0");
    }

    #[test]
    fn test_tilde_with_two_segments_spans_the_major() {
        assert_eq!(normalized_range("~1.2"), ">=1.2 <2.0.0-0");
        assert_eq!(normalized_range("~1.2@stable"), ">=1.2 <2.0.0-0");
        assert_eq!(normalized_range("~0.3,!=0.3.5"), ">=0.3 <1.0.0-0 !=0.3.5");
        assert_eq!(normalized_range("~1.2.3"), "~1.2.3");
        assert_eq!(normalized_range("~1"), "~1");
    }

    #[test]
    fn test_versions() {
        assert_eq!(normalized_version("dev-main"), "9999999.0.0");
        assert_eq!(normalized_version("1.2.x-dev"), "1.2.9999999-dev");
        assert_eq!(normalized_version("2.x-dev"), "2.9999999.9999999-dev");
        assert_eq!(normalized_version("1.0.0.0"), "1.0.0");
        assert_eq!(normalized_version("1.0.0.0-beta1"), "1.0.0-beta1");
        assert_eq!(normalized_version("1.0.0.3"), "1.0.0.3");
    }

    #[test]
    fn test_parses_composer_constraints() {
        let composer = ComposerDialect::new();
        let range = composer.parse_range(">=1.0,<2.0 | ^3.0").unwrap();
        assert_eq!(range.to_normalized_string(), ">=1.0.0 <2.0.0 || >=3.0.0 <4.0.0-0");
        assert_eq!(range.raw(), ">=1.0,<2.0 | ^3.0");

        let range = composer.parse_range("<>1.5.0").unwrap();
        assert_eq!(range.to_normalized_string(), "!=1.5.0");
    }

    #[test]
    fn test_stability_suffixes_fold_case() {
        let composer = ComposerDialect::new();
        let version = composer.parse_version("1.0.0-RC1").unwrap();
        assert_eq!(version.prerelease(), ["rc1"]);
        assert_eq!(version.raw(), "1.0.0-RC1");
        assert!(composer.parse_version("1.0.0.3").is_err());
    }

    #[test]
    fn test_default_branch_outranks_releases() {
        let composer = ComposerDialect::new();
        let master = composer.parse_version("dev-master").unwrap();
        assert_eq!(master.core(), (9999999, 0, 0));
        assert!(composer.parse_range(">=5.0").is_ok());
    }
}

//! Parsed range expressions

use std::fmt;

use serde::{Deserialize, Serialize};

use super::VersionConstraint;

/// How the constraints of a range combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RangeLogic {
    And,
    Or,
}

/// The constraint tree of a range.
///
/// `All` is a conjunction; an empty `All` matches anything. `AnyOf` is a
/// disjunction of conjunctive groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeSet {
    All(Vec<VersionConstraint>),
    AnyOf(Vec<Vec<VersionConstraint>>),
}

/// A parsed range expression together with its original text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedRange {
    raw: String,
    set: RangeSet,
}

impl ParsedRange {
    pub fn new(raw: impl Into<String>, set: RangeSet) -> Self {
        ParsedRange { raw: raw.into(), set }
    }

    /// The range that matches every version
    pub fn any(raw: impl Into<String>) -> Self {
        Self::new(raw, RangeSet::All(Vec::new()))
    }

    /// The expression this range was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn with_raw(self, raw: &str) -> Self {
        ParsedRange {
            raw: raw.to_string(),
            ..self
        }
    }

    pub fn set(&self) -> &RangeSet {
        &self.set
    }

    pub fn logic(&self) -> RangeLogic {
        match self.set {
            RangeSet::All(_) => RangeLogic::And,
            RangeSet::AnyOf(_) => RangeLogic::Or,
        }
    }

    /// Every constraint across all groups, in order
    pub fn constraints(&self) -> impl Iterator<Item = &VersionConstraint> {
        self.groups().into_iter().flatten()
    }

    /// The conjunctive groups; a single group for AND ranges
    pub fn groups(&self) -> Vec<&[VersionConstraint]> {
        match &self.set {
            RangeSet::All(constraints) => vec![constraints.as_slice()],
            RangeSet::AnyOf(groups) => groups.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Whether some group places no constraint at all
    pub fn is_any(&self) -> bool {
        self.groups().iter().any(|group| group.is_empty())
    }

    /// Canonical text form; re-parsing it yields an equivalent range
    pub fn to_normalized_string(&self) -> String {
        self.groups()
            .iter()
            .map(|group| normalize_group(group))
            .collect::<Vec<_>>()
            .join(" || ")
    }
}

fn normalize_group(group: &[VersionConstraint]) -> String {
    if group.is_empty() {
        return "*".to_string();
    }
    group.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for ParsedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_normalized_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Operator;
    use crate::ParsedVersion;

    fn gte(major: u64) -> VersionConstraint {
        VersionConstraint::new(Operator::GreaterThanOrEqual, ParsedVersion::new(major, 0, 0))
    }

    fn lt_floor(major: u64) -> VersionConstraint {
        VersionConstraint::floor(Operator::LessThan, ParsedVersion::new(major, 0, 0))
    }

    #[test]
    fn test_any_range() {
        let range = ParsedRange::any("*");
        assert!(range.is_any());
        assert_eq!(range.logic(), RangeLogic::And);
        assert_eq!(range.constraints().count(), 0);
        assert_eq!(range.to_normalized_string(), "*");
    }

    #[test]
    fn test_flattened_constraints_follow_groups() {
        let range = ParsedRange::new(
            "^1 || ^2",
            RangeSet::AnyOf(vec![vec![gte(1), lt_floor(2)], vec![gte(2), lt_floor(3)]]),
        );
        assert_eq!(range.logic(), RangeLogic::Or);
        assert_eq!(range.groups().len(), 2);
        let flattened: Vec<String> = range.constraints().map(|c| c.to_string()).collect();
        assert_eq!(flattened, [">=1.0.0", "<2.0.0-0", ">=2.0.0", "<3.0.0-0"]);
        assert_eq!(range.to_normalized_string(), ">=1.0.0 <2.0.0-0 || >=2.0.0 <3.0.0-0");
        assert!(!range.is_any());
    }

    #[test]
    fn test_empty_group_in_disjunction_matches_anything() {
        let range = ParsedRange::new("* || 1", RangeSet::AnyOf(vec![vec![], vec![gte(1)]]));
        assert!(range.is_any());
        assert_eq!(range.to_normalized_string(), "* || >=1.0.0");
    }
}

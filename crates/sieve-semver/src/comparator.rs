//! Version comparison utilities

use std::cmp::Ordering;

use crate::constraint::{Boundary, ParsedRange, RangeSet, VersionConstraint};
use crate::version::is_numeric;
use crate::ParsedVersion;

/// Comparator for ordering parsed versions by SemVer precedence
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &ParsedVersion, version2: &ParsedVersion) -> bool {
        Self::compare(version1, version2) == Ordering::Greater
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &ParsedVersion, version2: &ParsedVersion) -> bool {
        Self::compare(version1, version2) != Ordering::Less
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &ParsedVersion, version2: &ParsedVersion) -> bool {
        Self::compare(version1, version2) == Ordering::Less
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &ParsedVersion, version2: &ParsedVersion) -> bool {
        Self::compare(version1, version2) != Ordering::Greater
    }

    /// Check if version1 == version2, ignoring build metadata
    pub fn equal_to(version1: &ParsedVersion, version2: &ParsedVersion) -> bool {
        Self::compare(version1, version2) == Ordering::Equal
    }

    /// Check if version1 != version2, ignoring build metadata
    pub fn not_equal_to(version1: &ParsedVersion, version2: &ParsedVersion) -> bool {
        Self::compare(version1, version2) != Ordering::Equal
    }

    /// Total order over versions; build metadata never participates
    pub fn compare(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
        a.core()
            .cmp(&b.core())
            .then_with(|| match (a.is_prerelease(), b.is_prerelease()) {
                (false, false) => Ordering::Equal,
                (false, true) => Ordering::Greater,
                (true, false) => Ordering::Less,
                (true, true) => compare_prerelease(a.prerelease(), b.prerelease()),
            })
    }

    /// Where `version` sits relative to a constraint's target
    pub fn compare_to_target(version: &ParsedVersion, constraint: &VersionConstraint) -> Ordering {
        match constraint.boundary() {
            Boundary::Exact => Self::compare(version, constraint.version()),
            // Anything sharing the core sits above the floor
            Boundary::PrereleaseFloor => version
                .core()
                .cmp(&constraint.version().core())
                .then(Ordering::Greater),
        }
    }

    /// Check a single constraint
    pub fn satisfies_constraint(version: &ParsedVersion, constraint: &VersionConstraint) -> bool {
        constraint
            .operator()
            .accepts(Self::compare_to_target(version, constraint))
    }

    /// Check a conjunctive group; an empty group always holds
    pub fn satisfies_all(version: &ParsedVersion, constraints: &[VersionConstraint]) -> bool {
        constraints
            .iter()
            .all(|constraint| Self::satisfies_constraint(version, constraint))
    }

    /// Check a range with plain AND/OR logic, without any prerelease policy
    pub fn satisfies(version: &ParsedVersion, range: &ParsedRange) -> bool {
        match range.set() {
            RangeSet::All(constraints) => Self::satisfies_all(version, constraints),
            RangeSet::AnyOf(groups) => groups
                .iter()
                .any(|group| Self::satisfies_all(version, group)),
        }
    }
}

/// Identifier-by-identifier precedence; fewer identifiers rank lower
fn compare_prerelease(a: &[String], b: &[String]) -> Ordering {
    for (left, right) in a.iter().zip(b.iter()) {
        let ordering = compare_identifier(left, right);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Compare decimal strings of any length without overflowing
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

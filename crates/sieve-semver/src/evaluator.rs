//! Range evaluation with prerelease policy

use std::cmp::Ordering;

use log::trace;

use crate::comparator::Comparator;
use crate::config::SieveConfig;
use crate::constraint::{ParsedRange, RangeSet, VersionConstraint};
use crate::ParsedVersion;

/// Decides whether versions satisfy parsed ranges.
///
/// A prerelease version only satisfies a conjunctive group that admits it:
/// either prereleases are included by configuration, or the group has a
/// prerelease target or a `>`/`>=` constraint. A prerelease target sharing
/// the candidate's core version is covered by the first of those. OR ranges
/// apply this per group.
#[derive(Debug, Clone, Copy)]
pub struct RangeEvaluator {
    include_prereleases: bool,
}

impl RangeEvaluator {
    pub fn new(config: &SieveConfig) -> Self {
        RangeEvaluator {
            include_prereleases: config.include_prereleases,
        }
    }

    /// Check if a version satisfies a range
    pub fn satisfies(&self, version: &ParsedVersion, range: &ParsedRange) -> bool {
        match range.set() {
            RangeSet::All(constraints) => self.group_satisfies(version, constraints),
            RangeSet::AnyOf(groups) => groups.iter().any(|group| self.group_satisfies(version, group)),
        }
    }

    fn group_satisfies(&self, version: &ParsedVersion, group: &[VersionConstraint]) -> bool {
        if !self.admits(version, group) {
            trace!("Prerelease {} is not admitted by {:?}", version, group);
            return false;
        }
        Comparator::satisfies_all(version, group)
    }

    /// Whether the prerelease policy lets `version` be tested against `group`
    pub fn admits(&self, version: &ParsedVersion, group: &[VersionConstraint]) -> bool {
        if !version.is_prerelease() || self.include_prereleases {
            return true;
        }
        group
            .iter()
            .any(|constraint| constraint.targets_prerelease() || constraint.operator().is_lower_bound())
    }

    /// The ranges a version satisfies, in input order
    pub fn find_satisfying_ranges<'r>(&self, version: &ParsedVersion, ranges: &'r [ParsedRange]) -> Vec<&'r ParsedRange> {
        ranges.iter().filter(|range| self.satisfies(version, range)).collect()
    }

    /// The versions satisfying a range, in input order
    pub fn filter_satisfying<'v>(&self, versions: &'v [ParsedVersion], range: &ParsedRange) -> Vec<&'v ParsedVersion> {
        versions.iter().filter(|version| self.satisfies(version, range)).collect()
    }

    /// The highest satisfying version; the first of equal versions wins
    pub fn highest_satisfying<'v>(&self, versions: &'v [ParsedVersion], range: &ParsedRange) -> Option<&'v ParsedVersion> {
        self.pick(versions, range, Ordering::Greater)
    }

    /// The lowest satisfying version; the first of equal versions wins
    pub fn lowest_satisfying<'v>(&self, versions: &'v [ParsedVersion], range: &ParsedRange) -> Option<&'v ParsedVersion> {
        self.pick(versions, range, Ordering::Less)
    }

    fn pick<'v>(&self, versions: &'v [ParsedVersion], range: &ParsedRange, wanted: Ordering) -> Option<&'v ParsedVersion> {
        let mut best: Option<&ParsedVersion> = None;
        for version in versions {
            if !self.satisfies(version, range) {
                continue;
            }
            best = match best {
                Some(current) if Comparator::compare(version, current) != wanted => Some(current),
                _ => Some(version),
            };
        }
        best
    }
}

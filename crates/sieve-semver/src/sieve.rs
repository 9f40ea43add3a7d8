//! Sieve facade providing high-level version operations

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SieveConfig;
use crate::constraint::ParsedRange;
use crate::dialect::{parse_range_with, parse_version_with, Dialect, DialectKind};
use crate::error::Result;
use crate::{Comparator, ParsedVersion, RangeEvaluator};

/// Outcome of checking one version against several ranges
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Whether at least one range is satisfied
    pub matched: bool,
    /// The satisfied ranges as the caller wrote them, in input order
    pub matched_ranges: Vec<String>,
    /// Canonical form of every range, in input order
    pub normalized_ranges: Vec<String>,
}

/// Main facade: a dialect, its options and the evaluator wired together
#[derive(Debug)]
pub struct Sieve {
    dialect: Box<dyn Dialect>,
    config: SieveConfig,
    evaluator: RangeEvaluator,
}

impl Sieve {
    /// Create a facade for a built-in dialect with its preset options
    pub fn new(kind: DialectKind) -> Self {
        Self::with_dialect(kind.build())
    }

    pub fn with_dialect(dialect: Box<dyn Dialect>) -> Self {
        let config = dialect.config().clone();
        let evaluator = RangeEvaluator::new(&config);
        Sieve {
            dialect,
            config,
            evaluator,
        }
    }

    /// Replace the dialect's preset options; the dialect's rewriting still applies
    pub fn with_config(self, config: SieveConfig) -> Result<Self> {
        config.validate()?;
        let evaluator = RangeEvaluator::new(&config);
        Ok(Sieve {
            dialect: self.dialect,
            config,
            evaluator,
        })
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &RangeEvaluator {
        &self.evaluator
    }

    pub fn parse_version(&self, version: &str) -> Result<ParsedVersion> {
        parse_version_with(self.dialect.as_ref(), version, &self.config)
    }

    pub fn parse_range(&self, range: &str) -> Result<ParsedRange> {
        parse_range_with(self.dialect.as_ref(), range, &self.config)
    }

    /// Compare two version strings by precedence
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering> {
        Ok(Comparator::compare(&self.parse_version(a)?, &self.parse_version(b)?))
    }

    /// Check if a version satisfies a range
    pub fn satisfies(&self, version: &str, range: &str) -> Result<bool> {
        let version = self.parse_version(version)?;
        let range = self.parse_range(range)?;
        Ok(self.evaluator.satisfies(&version, &range))
    }

    /// Check if a version satisfies any of the ranges.
    ///
    /// Every range is parsed before any is evaluated, so a malformed range
    /// is an error even when an earlier range matches.
    pub fn includes<S: AsRef<str>>(&self, version: &str, ranges: &[S]) -> Result<bool> {
        let version = self.parse_version(version)?;
        let ranges = self.parse_ranges(ranges)?;
        Ok(ranges.iter().any(|range| self.evaluator.satisfies(&version, range)))
    }

    /// Detailed variant of [`Sieve::includes`]
    pub fn match_ranges<S: AsRef<str>>(&self, version: &str, ranges: &[S]) -> Result<MatchReport> {
        let parsed_version = self.parse_version(version)?;
        let ranges = self.parse_ranges(ranges)?;

        let matched_ranges: Vec<String> = self
            .evaluator
            .find_satisfying_ranges(&parsed_version, &ranges)
            .into_iter()
            .map(|range| range.raw().to_string())
            .collect();
        debug!(
            "{} matched {} of {} range(s) using {}",
            version,
            matched_ranges.len(),
            ranges.len(),
            self.dialect.name()
        );

        Ok(MatchReport {
            matched: !matched_ranges.is_empty(),
            matched_ranges,
            normalized_ranges: ranges.iter().map(ParsedRange::to_normalized_string).collect(),
        })
    }

    /// Return the versions satisfying a range, in input order
    pub fn filter_satisfying<S: AsRef<str>>(&self, versions: &[S], range: &str) -> Result<Vec<String>> {
        let range = self.parse_range(range)?;
        let versions = self.parse_versions(versions)?;
        Ok(self
            .evaluator
            .filter_satisfying(&versions, &range)
            .into_iter()
            .map(|version| version.raw().to_string())
            .collect())
    }

    /// The highest version satisfying a range
    pub fn highest_satisfying<S: AsRef<str>>(&self, versions: &[S], range: &str) -> Result<Option<String>> {
        let range = self.parse_range(range)?;
        let versions = self.parse_versions(versions)?;
        Ok(self
            .evaluator
            .highest_satisfying(&versions, &range)
            .map(|version| version.raw().to_string()))
    }

    /// The lowest version satisfying a range
    pub fn lowest_satisfying<S: AsRef<str>>(&self, versions: &[S], range: &str) -> Result<Option<String>> {
        let range = self.parse_range(range)?;
        let versions = self.parse_versions(versions)?;
        Ok(self
            .evaluator
            .lowest_satisfying(&versions, &range)
            .map(|version| version.raw().to_string()))
    }

    /// Sort versions in ascending order
    pub fn sort<S: AsRef<str>>(&self, versions: &[S]) -> Result<Vec<String>> {
        self.usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort<S: AsRef<str>>(&self, versions: &[S]) -> Result<Vec<String>> {
        self.usort(versions, false)
    }

    fn usort<S: AsRef<str>>(&self, versions: &[S], ascending: bool) -> Result<Vec<String>> {
        let mut parsed = self.parse_versions(versions)?;

        // Stable, so equal versions keep their input order either way
        parsed.sort_by(|a, b| {
            let cmp = Comparator::compare(a, b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        Ok(parsed.into_iter().map(|version| version.raw().to_string()).collect())
    }

    fn parse_versions<S: AsRef<str>>(&self, versions: &[S]) -> Result<Vec<ParsedVersion>> {
        versions.iter().map(|v| self.parse_version(v.as_ref())).collect()
    }

    fn parse_ranges<S: AsRef<str>>(&self, ranges: &[S]) -> Result<Vec<ParsedRange>> {
        ranges.iter().map(|r| self.parse_range(r.as_ref())).collect()
    }
}

impl Default for Sieve {
    fn default() -> Self {
        Self::new(DialectKind::default())
    }
}

//! Multi-dialect version range evaluation
//!
//! This crate parses version strings and range expressions (caret, tilde,
//! wildcard, hyphen, comparator and `||` forms), orders versions by SemVer
//! precedence and decides range satisfaction, with dialects for npm,
//! Composer, Maven and Go module notations.

pub mod constraint;
pub mod dialect;
mod comparator;
mod config;
mod error;
mod evaluator;
mod range_parser;
mod sieve;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use config::{SieveConfig, DEFAULT_MAX_VERSION_LENGTH, MAX_VERSION_LENGTH_CEILING};
pub use constraint::{Boundary, InvalidOperatorError, Operator, ParsedRange, RangeLogic, RangeSet, VersionConstraint};
pub use dialect::{ComposerDialect, Dialect, DialectKind, GoDialect, MavenDialect, NpmDialect, SemverDialect};
pub use error::{Result, SieveError};
pub use evaluator::RangeEvaluator;
pub use range_parser::RangeParser;
pub use sieve::{MatchReport, Sieve};
pub use version::ParsedVersion;
pub use version_parser::{PartialVersion, VersionParser};

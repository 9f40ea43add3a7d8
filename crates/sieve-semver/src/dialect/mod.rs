//! Ecosystem dialects layered on the shared parsers
//!
//! A dialect is an option preset plus light string rewriting. Versions and
//! ranges are rewritten into the shared grammar first, then parsed with the
//! dialect's configuration; the parsed values keep the caller's raw text.

mod composer;
mod go;
mod maven;
mod npm;
mod semver;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

pub use composer::ComposerDialect;
pub use go::GoDialect;
pub use maven::MavenDialect;
pub use npm::NpmDialect;
pub use semver::SemverDialect;

use crate::config::SieveConfig;
use crate::constraint::{Operator, ParsedRange};
use crate::error::{Result, SieveError};
use crate::{ParsedVersion, RangeParser, VersionParser};

/// Capability interface every ecosystem dialect implements
pub trait Dialect: fmt::Debug + Send + Sync {
    fn kind(&self) -> DialectKind;

    /// The option preset this dialect parses with
    fn config(&self) -> &SieveConfig;

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Operator spellings accepted in ranges, shorthands and aliases included
    fn supported_operators(&self) -> Vec<String> {
        let mut operators: Vec<String> = Operator::SPELLINGS.iter().map(|s| s.to_string()).collect();
        operators.extend(["^".to_string(), "~".to_string()]);
        operators.extend(self.config().operator_aliases.keys().cloned());
        operators
    }

    /// Rewrite a version into the shared grammar
    fn normalize_version<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(input))
    }

    /// Rewrite a range into the shared grammar
    fn normalize_range<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(input))
    }

    fn parse_version(&self, input: &str) -> Result<ParsedVersion> {
        parse_version_with(self, input, self.config())
    }

    fn parse_range(&self, input: &str) -> Result<ParsedRange> {
        parse_range_with(self, input, self.config())
    }
}

/// Normalize through `dialect`, then parse with an explicit configuration
pub(crate) fn parse_version_with<D: Dialect + ?Sized>(
    dialect: &D,
    input: &str,
    config: &SieveConfig,
) -> Result<ParsedVersion> {
    let normalized = dialect.normalize_version(input)?;
    if normalized != input {
        trace!("{} rewrote version \"{}\" to \"{}\"", dialect.name(), input, normalized);
    }
    let version = VersionParser::new(config)
        .parse(&normalized)
        .map_err(|e| e.reported_as(input))?;
    Ok(version.with_raw(input))
}

/// Normalize through `dialect`, then parse with an explicit configuration
pub(crate) fn parse_range_with<D: Dialect + ?Sized>(
    dialect: &D,
    input: &str,
    config: &SieveConfig,
) -> Result<ParsedRange> {
    let normalized = dialect.normalize_range(input)?;
    if normalized != input {
        trace!("{} rewrote range \"{}\" to \"{}\"", dialect.name(), input, normalized);
    }
    let range = RangeParser::new(config)
        .parse(&normalized)
        .map_err(|e| e.reported_as(input))?;
    Ok(range.with_raw(input))
}

/// The built-in dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    Semver,
    Npm,
    Composer,
    Maven,
    Go,
}

impl DialectKind {
    pub const ALL: [DialectKind; 5] = [
        DialectKind::Semver,
        DialectKind::Npm,
        DialectKind::Composer,
        DialectKind::Maven,
        DialectKind::Go,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DialectKind::Semver => "semver",
            DialectKind::Npm => "npm",
            DialectKind::Composer => "composer",
            DialectKind::Maven => "maven",
            DialectKind::Go => "go",
        }
    }

    /// Instantiate the dialect with its preset configuration
    pub fn build(&self) -> Box<dyn Dialect> {
        match self {
            DialectKind::Semver => Box::new(SemverDialect::new()),
            DialectKind::Npm => Box::new(NpmDialect::new()),
            DialectKind::Composer => Box::new(ComposerDialect::new()),
            DialectKind::Maven => Box::new(MavenDialect::new()),
            DialectKind::Go => Box::new(GoDialect::new()),
        }
    }
}

impl FromStr for DialectKind {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semver" => Ok(DialectKind::Semver),
            "npm" | "node" => Ok(DialectKind::Npm),
            "composer" | "php" => Ok(DialectKind::Composer),
            "maven" => Ok(DialectKind::Maven),
            "go" | "golang" => Ok(DialectKind::Go),
            _ => Err(SieveError::config(
                "dialect",
                format!("unknown dialect \"{}\", expected one of semver, npm, composer, maven, go", s),
            )),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

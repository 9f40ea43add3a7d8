//! Structured version values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// A parsed `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version.
///
/// Equality is structural: two values differing only in build metadata or raw
/// input are distinct values even though [`Comparator::compare`] ranks them
/// equal.
///
/// [`Comparator::compare`]: crate::Comparator::compare
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedVersion {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<String>,
    build: Vec<String>,
    raw: String,
}

impl ParsedVersion {
    /// Create a release version with no prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ParsedVersion {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
            raw: format!("{}.{}.{}", major, minor, patch),
        }
    }

    pub(crate) fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Vec<String>,
        build: Vec<String>,
        raw: &str,
    ) -> Self {
        ParsedVersion {
            major,
            minor,
            patch,
            prerelease,
            build,
            raw: raw.to_string(),
        }
    }

    pub(crate) fn with_raw(self, raw: &str) -> Self {
        ParsedVersion {
            raw: raw.to_string(),
            ..self
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Prerelease identifiers in order; empty for a release
    pub fn prerelease(&self) -> &[String] {
        &self.prerelease
    }

    /// Build metadata identifiers; never compared
    pub fn build(&self) -> &[String] {
        &self.build
    }

    /// The input this value was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// The `(major, minor, patch)` triple
    pub fn core(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Whether both versions share major, minor and patch
    pub fn same_core(&self, other: &ParsedVersion) -> bool {
        self.core() == other.core()
    }

    /// A copy carrying different prerelease identifiers
    pub fn with_prerelease<I, S>(&self, identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prerelease: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        for identifier in &prerelease {
            validate_identifier(identifier, true, false).map_err(|reason| SieveError::version(&self.raw, reason))?;
        }
        Ok(ParsedVersion {
            prerelease,
            ..self.clone()
        })
    }

    /// A copy carrying different build metadata
    pub fn with_build<I, S>(&self, identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let build: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        for identifier in &build {
            validate_identifier(identifier, false, true).map_err(|reason| SieveError::version(&self.raw, reason))?;
        }
        Ok(ParsedVersion {
            build,
            ..self.clone()
        })
    }

    /// A copy with prerelease and build stripped
    pub fn to_release(&self) -> Self {
        ParsedVersion {
            prerelease: Vec::new(),
            build: Vec::new(),
            ..self.clone()
        }
    }
}

/// Check one dot-separated identifier.
///
/// Numeric prerelease identifiers with leading zeros are rejected unless
/// `allow_leading_zeros` is set; build identifiers always accept them.
pub(crate) fn validate_identifier(
    identifier: &str,
    prerelease: bool,
    allow_leading_zeros: bool,
) -> std::result::Result<(), String> {
    if identifier.is_empty() {
        return Err(if prerelease {
            "empty prerelease identifier".to_string()
        } else {
            "empty build identifier".to_string()
        });
    }
    if let Some(bad) = identifier.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
        return Err(format!("invalid character '{}' in identifier \"{}\"", bad, identifier));
    }
    if prerelease && !allow_leading_zeros && is_numeric(identifier) && identifier.len() > 1 && identifier.starts_with('0') {
        return Err(format!("numeric identifier \"{}\" has a leading zero", identifier));
    }
    Ok(())
}

pub(crate) fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

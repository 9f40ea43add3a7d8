//! Single version constraint implementation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{InvalidOperatorError, Operator};
use crate::ParsedVersion;

/// How a constraint's target version is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    /// Compare against the target version itself
    #[default]
    Exact,
    /// Compare against the lowest point of the target's core version, below
    /// every prerelease of it. `<2.0.0` with this boundary rejects
    /// `2.0.0-alpha`.
    PrereleaseFloor,
}

/// A single version constraint (e.g., `>=1.0.0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionConstraint {
    operator: Operator,
    version: ParsedVersion,
    boundary: Boundary,
}

impl VersionConstraint {
    /// Create a new constraint against an exact version
    pub fn new(operator: Operator, version: ParsedVersion) -> Self {
        VersionConstraint {
            operator,
            version,
            boundary: Boundary::Exact,
        }
    }

    /// Create a constraint against the prerelease floor of `version`'s core
    pub fn floor(operator: Operator, version: ParsedVersion) -> Self {
        VersionConstraint {
            operator,
            version: version.to_release(),
            boundary: Boundary::PrereleaseFloor,
        }
    }

    /// Create a constraint from an operator spelling
    pub fn from_str(operator: &str, version: ParsedVersion) -> Result<Self, InvalidOperatorError> {
        Ok(Self::new(operator.parse()?, version))
    }

    /// Get the operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the target version
    pub fn version(&self) -> &ParsedVersion {
        &self.version
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn is_prerelease_floor(&self) -> bool {
        self.boundary == Boundary::PrereleaseFloor
    }

    /// Whether the target is a real prerelease version (floors are not)
    pub fn targets_prerelease(&self) -> bool {
        self.boundary == Boundary::Exact && self.version.is_prerelease()
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.version;
        write!(f, "{}{}.{}.{}", self.operator, v.major(), v.minor(), v.patch())?;
        match self.boundary {
            Boundary::PrereleaseFloor => write!(f, "-0"),
            Boundary::Exact if v.is_prerelease() => write!(f, "-{}", v.prerelease().join(".")),
            Boundary::Exact => Ok(()),
        }
    }
}

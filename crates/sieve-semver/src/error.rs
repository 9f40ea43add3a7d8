//! Error types shared by every parsing boundary

use thiserror::Error;

/// Errors raised while parsing versions, ranges or configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    #[error("Invalid version string \"{version}\": {reason}")]
    InvalidVersion { version: String, reason: String },
    #[error("Could not parse version range \"{range}\": {reason}")]
    InvalidRange { range: String, reason: String },
    #[error("Invalid configuration for \"{option}\": {reason}")]
    InvalidConfiguration { option: String, reason: String },
}

impl SieveError {
    pub(crate) fn version(version: &str, reason: impl Into<String>) -> Self {
        SieveError::InvalidVersion {
            version: version.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range(range: &str, reason: impl Into<String>) -> Self {
        SieveError::InvalidRange {
            range: range.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(option: &str, reason: impl Into<String>) -> Self {
        SieveError::InvalidConfiguration {
            option: option.to_string(),
            reason: reason.into(),
        }
    }

    /// Re-label a version failure found inside a range expression
    pub(crate) fn into_range(self, range: &str) -> Self {
        match self {
            SieveError::InvalidVersion { version, reason } => SieveError::InvalidRange {
                range: range.to_string(),
                reason: format!("invalid version \"{}\" ({})", version, reason),
            },
            other => other,
        }
    }

    /// Point the error at the caller's text instead of a rewritten form of it
    pub(crate) fn reported_as(self, input: &str) -> Self {
        match self {
            SieveError::InvalidVersion { reason, .. } => SieveError::version(input, reason),
            SieveError::InvalidRange { reason, .. } => SieveError::range(input, reason),
            other => other,
        }
    }

    /// Whether this is a version failure
    pub fn is_invalid_version(&self) -> bool {
        matches!(self, SieveError::InvalidVersion { .. })
    }

    /// Whether this is a range failure
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, SieveError::InvalidRange { .. })
    }

    /// Whether this is a configuration failure
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, SieveError::InvalidConfiguration { .. })
    }
}

pub type Result<T> = std::result::Result<T, SieveError>;

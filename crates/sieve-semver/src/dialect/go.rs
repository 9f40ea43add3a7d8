//! Go module versions

use std::borrow::Cow;

use super::{Dialect, DialectKind};
use crate::config::SieveConfig;
use crate::error::{Result, SieveError};

/// Marks a v2+ module without a go.mod; carries no ordering meaning
const INCOMPATIBLE_SUFFIX: &str = "+incompatible";

#[derive(Debug, Clone)]
pub struct GoDialect {
    config: SieveConfig,
}

impl GoDialect {
    pub fn new() -> Self {
        GoDialect {
            config: SieveConfig::default().with_strict_segments(true),
        }
    }
}

impl Default for GoDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for GoDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Go
    }

    fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Module versions always start with `v`
    fn normalize_version<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let version = input.trim();
        if !version.starts_with('v') {
            return Err(SieveError::version(input, "module versions must start with \"v\""));
        }
        Ok(Cow::Borrowed(
            version.strip_suffix(INCOMPATIBLE_SUFFIX).unwrap_or(version),
        ))
    }

    fn normalize_range<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let trimmed = input.trim();
        if trimmed == "latest" {
            return Ok(Cow::Borrowed("*"));
        }
        if trimmed.contains(INCOMPATIBLE_SUFFIX) {
            return Ok(Cow::Owned(trimmed.replace(INCOMPATIBLE_SUFFIX, "")));
        }
        Ok(Cow::Borrowed(input))
    }
}

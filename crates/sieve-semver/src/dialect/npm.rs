//! npm / node-semver notation

use std::borrow::Cow;

use super::{Dialect, DialectKind};
use crate::config::SieveConfig;
use crate::error::Result;

/// Tags npm resolves to "any published version"
const ANY_TAGS: &[&str] = &["", "*", "latest"];

#[derive(Debug, Clone, Default)]
pub struct NpmDialect {
    config: SieveConfig,
}

impl NpmDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dialect for NpmDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Npm
    }

    fn config(&self) -> &SieveConfig {
        &self.config
    }

    fn supported_operators(&self) -> Vec<String> {
        let mut operators: Vec<String> = crate::constraint::Operator::SPELLINGS
            .iter()
            .map(|s| s.to_string())
            .collect();
        operators.extend(["^", "~", "~>"].iter().map(|s| s.to_string()));
        operators
    }

    /// `=1.2.3` and `= 1.2.3` name the version itself
    fn normalize_version<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let trimmed = input.trim();
        match trimmed.strip_prefix('=') {
            Some(rest) => Ok(Cow::Borrowed(rest.trim_start())),
            None => Ok(Cow::Borrowed(input)),
        }
    }

    fn normalize_range<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let trimmed = input.trim();
        if ANY_TAGS.iter().any(|tag| *tag == trimmed) {
            return Ok(Cow::Borrowed("*"));
        }
        if trimmed.contains("~>") {
            return Ok(Cow::Owned(trimmed.replace("~>", "~")));
        }
        Ok(Cow::Borrowed(input))
    }
}

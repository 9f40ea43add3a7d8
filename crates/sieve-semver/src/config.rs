//! Parsing and evaluation options

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constraint::Operator;
use crate::error::{Result, SieveError};

/// Upper limit accepted for [`SieveConfig::max_version_length`]
pub const MAX_VERSION_LENGTH_CEILING: usize = 4096;

/// Default for [`SieveConfig::max_version_length`]
pub const DEFAULT_MAX_VERSION_LENGTH: usize = 256;

/// Immutable option bundle consumed by the parsers and the evaluator.
///
/// Every `with_*` method returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SieveConfig {
    /// Admit prerelease versions without the gate checks
    pub include_prereleases: bool,
    /// Require all of MAJOR.MINOR.PATCH in plain versions
    pub strict_segments: bool,
    /// Accept a leading `v`/`V`
    pub allow_v_prefix: bool,
    /// Lowercase prerelease identifiers while parsing
    pub case_insensitive: bool,
    /// Skip the leading zero rejection on numeric segments
    pub allow_leading_zeros: bool,
    /// Inputs longer than this are rejected
    pub max_version_length: usize,
    /// Extra operator spellings, mapped to a canonical operator spelling
    pub operator_aliases: BTreeMap<String, String>,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            include_prereleases: false,
            strict_segments: false,
            allow_v_prefix: true,
            case_insensitive: false,
            allow_leading_zeros: false,
            max_version_length: DEFAULT_MAX_VERSION_LENGTH,
            operator_aliases: BTreeMap::new(),
        }
    }
}

impl SieveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_prereleases(&self, include: bool) -> Self {
        SieveConfig {
            include_prereleases: include,
            ..self.clone()
        }
    }

    pub fn with_strict_segments(&self, strict: bool) -> Self {
        SieveConfig {
            strict_segments: strict,
            ..self.clone()
        }
    }

    pub fn with_v_prefix(&self, allow: bool) -> Self {
        SieveConfig {
            allow_v_prefix: allow,
            ..self.clone()
        }
    }

    pub fn with_case_insensitive(&self, case_insensitive: bool) -> Self {
        SieveConfig {
            case_insensitive,
            ..self.clone()
        }
    }

    pub fn with_leading_zeros(&self, allow: bool) -> Self {
        SieveConfig {
            allow_leading_zeros: allow,
            ..self.clone()
        }
    }

    pub fn with_max_version_length(&self, max: usize) -> Result<Self> {
        check_max_length(max)?;
        Ok(SieveConfig {
            max_version_length: max,
            ..self.clone()
        })
    }

    /// Register `alias` as another spelling of the canonical operator `target`
    pub fn with_operator_alias(&self, alias: &str, target: &str) -> Result<Self> {
        check_alias(alias, target)?;
        let mut operator_aliases = self.operator_aliases.clone();
        operator_aliases.insert(alias.to_string(), target.to_string());
        Ok(SieveConfig {
            operator_aliases,
            ..self.clone()
        })
    }

    /// Check every option against its allowed bounds
    pub fn validate(&self) -> Result<()> {
        check_max_length(self.max_version_length)?;
        for (alias, target) in &self.operator_aliases {
            check_alias(alias, target)?;
        }
        Ok(())
    }

    /// Resolved alias table, longest spelling first
    pub(crate) fn resolved_aliases(&self) -> Vec<(&str, Operator)> {
        let mut aliases: Vec<(&str, Operator)> = self
            .operator_aliases
            .iter()
            .filter_map(|(alias, target)| target.parse().ok().map(|op| (alias.as_str(), op)))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        aliases
    }

    /// Stable summary of every option, suitable as a memoization key
    pub fn fingerprint(&self) -> String {
        let flags = [
            self.include_prereleases,
            self.strict_segments,
            self.allow_v_prefix,
            self.case_insensitive,
            self.allow_leading_zeros,
        ];
        let mut fingerprint: String = flags.iter().map(|f| if *f { '1' } else { '0' }).collect();
        fingerprint.push(':');
        fingerprint.push_str(&self.max_version_length.to_string());
        for (alias, target) in &self.operator_aliases {
            fingerprint.push_str(&format!(":{}={}", alias, target));
        }
        fingerprint
    }
}

fn check_max_length(max: usize) -> Result<()> {
    if max == 0 {
        return Err(SieveError::config("max-version-length", "must be greater than zero"));
    }
    if max > MAX_VERSION_LENGTH_CEILING {
        return Err(SieveError::config(
            "max-version-length",
            format!("{} exceeds the ceiling of {}", max, MAX_VERSION_LENGTH_CEILING),
        ));
    }
    Ok(())
}

fn check_alias(alias: &str, target: &str) -> Result<()> {
    let option = format!("operator-aliases.{}", alias);
    if alias.is_empty() {
        return Err(SieveError::config("operator-aliases", "alias spelling must not be empty"));
    }
    if alias
        .chars()
        .any(|c| c.is_whitespace() || c.is_ascii_alphanumeric() || matches!(c, '|' | '^' | '~' | '*' | '.' | '-' | '+'))
    {
        return Err(SieveError::config(
            &option,
            "alias may only contain punctuation that cannot start a version",
        ));
    }
    if Operator::SPELLINGS.contains(&alias) {
        return Err(SieveError::config(&option, "alias shadows a built-in operator"));
    }
    if target.parse::<Operator>().is_err() {
        return Err(SieveError::config(
            &option,
            format!(
                "target \"{}\" is not one of: {}",
                target,
                Operator::SPELLINGS.join(", ")
            ),
        ));
    }
    Ok(())
}

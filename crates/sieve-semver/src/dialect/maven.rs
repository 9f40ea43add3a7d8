//! Maven version range notation
//!
//! Intervals are rewritten into comparator form: `[1.0,2.0)` becomes
//! `>=1.0 <2.0`, `(,1.0]` becomes `<=1.0`, `[1.2]` pins a version, and
//! comma-separated intervals are alternatives.

use std::borrow::Cow;

use super::{Dialect, DialectKind};
use crate::config::SieveConfig;
use crate::error::{Result, SieveError};

/// Metaversions resolved to the newest available version
const ANY_TAGS: &[&str] = &["RELEASE", "LATEST"];

#[derive(Debug, Clone)]
pub struct MavenDialect {
    config: SieveConfig,
}

impl MavenDialect {
    pub fn new() -> Self {
        MavenDialect {
            config: SieveConfig::default().with_case_insensitive(true),
        }
    }
}

impl Default for MavenDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for MavenDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Maven
    }

    fn config(&self) -> &SieveConfig {
        &self.config
    }

    fn supported_operators(&self) -> Vec<String> {
        ["[", "]", "(", ")", ","].iter().map(|s| s.to_string()).collect()
    }

    fn normalize_range<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let trimmed = input.trim();
        if ANY_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(trimmed)) {
            return Ok(Cow::Borrowed("*"));
        }
        if trimmed.starts_with(['[', '(']) {
            return rewrite_intervals(trimmed, input).map(Cow::Owned);
        }
        Ok(Cow::Borrowed(input))
    }
}

fn rewrite_intervals(intervals: &str, input: &str) -> Result<String> {
    let mut clauses = Vec::new();
    let mut rest = intervals;

    while !rest.is_empty() {
        let inclusive_lower = match rest.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(SieveError::range(input, "expected \"[\" or \"(\" to open an interval")),
        };
        let close = rest
            .find([']', ')'])
            .ok_or_else(|| SieveError::range(input, "unterminated interval"))?;
        let inclusive_upper = rest[close..].starts_with(']');
        clauses.push(interval(&rest[1..close], inclusive_lower, inclusive_upper, input)?);

        rest = rest[close + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(SieveError::range(input, "trailing \",\" after the last interval"));
            }
        } else if !rest.is_empty() {
            return Err(SieveError::range(input, "intervals must be separated by \",\""));
        }
    }
    Ok(clauses.join(" || "))
}

fn interval(body: &str, inclusive_lower: bool, inclusive_upper: bool, input: &str) -> Result<String> {
    let (lower, upper) = match body.split_once(',') {
        Some(bounds) => bounds,
        None => {
            let version = body.trim();
            if version.is_empty() || !inclusive_lower || !inclusive_upper {
                return Err(SieveError::range(
                    input,
                    "a single version interval must be written as \"[version]\"",
                ));
            }
            return Ok(format!("={}", version));
        }
    };
    if upper.contains(',') {
        return Err(SieveError::range(input, "an interval has at most two bounds"));
    }

    let mut bounds = Vec::new();
    let lower = lower.trim();
    if !lower.is_empty() {
        bounds.push(format!("{}{}", if inclusive_lower { ">=" } else { ">" }, lower));
    }
    let upper = upper.trim();
    if !upper.is_empty() {
        bounds.push(format!("{}{}", if inclusive_upper { "<=" } else { "<" }, upper));
    }

    if bounds.is_empty() {
        return Ok("*".to_string());
    }
    Ok(bounds.join(" "))
}

//! Operator types for version constraints

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comparison operators for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    #[serde(rename = "=")]
    Equal,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    NotEqual,
    /// Less than (<)
    #[serde(rename = "<")]
    LessThan,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// Greater than (>)
    #[serde(rename = ">")]
    GreaterThan,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// Every spelling the shared parser understands, longest first so prefix
    /// matching never stops early on `>` when `>=` was written.
    pub const SPELLINGS: &'static [&'static str] = &["!==", ">=", "<=", "!=", "==", ">", "<", "="];

    /// Get the canonical string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Whether the ordering of `version` relative to the target satisfies this operator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::NotEqual => ordering != Ordering::Equal,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    /// Whether this operator opens the range upwards (`>` or `>=`)
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::GreaterThanOrEqual)
    }

    /// Split a leading canonical operator off a token
    pub fn split_prefix(token: &str) -> Option<(Operator, &str)> {
        Self::SPELLINGS.iter().find_map(|spelling| {
            token
                .strip_prefix(spelling)
                .and_then(|rest| spelling.parse().ok().map(|op| (op, rest)))
        })
    }
}

impl FromStr for Operator {
    type Err = InvalidOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Operator::Equal),
            "!=" | "!==" => Ok(Operator::NotEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            _ => Err(InvalidOperatorError(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

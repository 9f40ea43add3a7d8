//! Range expression parsing
//!
//! A range is either a single AND clause or several clauses joined by `||`.
//! Each clause is first tried as a hyphen range (`A - B`); otherwise it is
//! split on whitespace and every token is read as a caret (`^V`), tilde
//! (`~V`), wildcard (`1.2.x`) or plain comparator (`>=V`, `V`) constraint.
//! Shorthands expand into explicit `>=`/`<`/`<=` pairs where exclusive upper
//! bounds use a prerelease floor, so `^1.2.3` becomes `>=1.2.3 <2.0.0-0`.

use log::trace;

use crate::config::SieveConfig;
use crate::constraint::{Operator, ParsedRange, RangeSet, VersionConstraint};
use crate::error::{Result, SieveError};
use crate::version_parser::{has_floor_marker, PartialVersion, VersionParser};
use crate::ParsedVersion;

const OR_SEPARATOR: &str = "||";
const HYPHEN_SEPARATOR: &str = " - ";

/// Parser turning range expressions into constraint trees
#[derive(Debug, Clone)]
pub struct RangeParser<'c> {
    versions: VersionParser<'c>,
    aliases: Vec<(&'c str, Operator)>,
}

impl<'c> RangeParser<'c> {
    pub fn new(config: &'c SieveConfig) -> Self {
        RangeParser {
            versions: VersionParser::new(config),
            aliases: config.resolved_aliases(),
        }
    }

    /// Check if a range expression is valid
    pub fn is_valid(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }

    /// Parse a range expression
    pub fn parse(&self, input: &str) -> Result<ParsedRange> {
        let expression = input.trim();
        if expression.is_empty() {
            return Err(SieveError::range(input, "empty range"));
        }

        if !expression.contains(OR_SEPARATOR) {
            let constraints = self.parse_clause(expression, input)?;
            return Ok(ParsedRange::new(input, RangeSet::All(constraints)));
        }

        let mut groups = Vec::new();
        for clause in expression.split(OR_SEPARATOR) {
            let clause = clause.trim();
            if clause.is_empty() {
                return Err(SieveError::range(input, "empty clause next to \"||\""));
            }
            groups.push(self.parse_clause(clause, input)?);
        }
        Ok(ParsedRange::new(input, RangeSet::AnyOf(groups)))
    }

    /// Parse one AND clause
    fn parse_clause(&self, clause: &str, input: &str) -> Result<Vec<VersionConstraint>> {
        if let Some((from, to)) = clause.split_once(HYPHEN_SEPARATOR) {
            return self.parse_hyphen(from.trim(), to.trim(), input);
        }
        if clause == "-" || clause.starts_with("- ") || clause.ends_with(" -") {
            return Err(SieveError::range(input, "hyphen range is missing an operand"));
        }

        let mut constraints = Vec::new();
        for token in self.tokenize(clause, input)? {
            constraints.extend(self.parse_token(&token, input)?);
        }
        Ok(constraints)
    }

    /// Split on whitespace, re-attaching operators written apart from their version
    fn tokenize(&self, clause: &str, input: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        let mut pending: Option<String> = None;

        for word in clause.split_whitespace() {
            if let Some(operator) = &pending {
                if self.starts_with_operator(word) {
                    return Err(SieveError::range(
                        input,
                        format!("operator \"{}\" is followed by another operator in \"{}\"", operator, word),
                    ));
                }
            }
            let mut token = pending.take().unwrap_or_default();
            token.push_str(word);
            if self.is_bare_operator(&token) {
                pending = Some(token);
            } else {
                tokens.push(token);
            }
        }

        if let Some(operator) = pending {
            return Err(SieveError::range(
                input,
                format!("operator \"{}\" is missing a version", operator),
            ));
        }
        Ok(tokens)
    }

    fn starts_with_operator(&self, word: &str) -> bool {
        word.starts_with(['^', '~']) || self.split_operator(word).0.is_some()
    }

    fn is_bare_operator(&self, token: &str) -> bool {
        if token == "^" || token == "~" {
            return true;
        }
        matches!(self.split_operator(token), (Some(_), rest) if rest.is_empty())
    }

    /// Split the longest known operator spelling, aliases included, off a token
    fn split_operator<'t>(&self, token: &'t str) -> (Option<Operator>, &'t str) {
        let alias = self
            .aliases
            .iter()
            .find(|(spelling, _)| token.starts_with(spelling))
            .map(|(spelling, op)| (*op, &token[spelling.len()..]));
        let canonical = Operator::split_prefix(token);

        let chosen = match (alias, canonical) {
            (Some(a), Some(c)) => Some(if a.1.len() <= c.1.len() { a } else { c }),
            (a, c) => a.or(c),
        };
        match chosen {
            Some((op, rest)) => (Some(op), rest),
            None => (None, token),
        }
    }

    fn parse_token(&self, token: &str, input: &str) -> Result<Vec<VersionConstraint>> {
        if let Some(operand) = token.strip_prefix('^') {
            return self.parse_caret(operand, input);
        }
        if let Some(operand) = token.strip_prefix('~') {
            return self.parse_tilde(operand, input);
        }

        let (operator, text) = self.split_operator(token);
        let operator = operator.unwrap_or(Operator::Equal);
        if text.is_empty() {
            return Err(SieveError::range(
                input,
                format!("operator \"{}\" is missing a version", token),
            ));
        }

        if has_wildcard(text) {
            return self.parse_x_range(operator, text, input);
        }

        let version = self.versions.parse(text).map_err(|e| e.into_range(input))?;
        // `<X-0` is how exclusive upper bounds are written back out
        let constraint = if operator == Operator::LessThan && has_floor_marker(text) {
            VersionConstraint::floor(operator, version)
        } else {
            VersionConstraint::new(operator, version)
        };
        trace!("Parsed comparator {} from \"{}\"", constraint, token);
        Ok(vec![constraint])
    }

    fn partial(&self, operand: &str, input: &str, shorthand: &str) -> Result<PartialVersion> {
        if operand.trim().is_empty() {
            return Err(SieveError::range(
                input,
                format!("{} range is missing a version", shorthand),
            ));
        }
        self.versions
            .parse_partial(operand)
            .map_err(|e| e.into_range(input))
    }

    /// `^V`: allow changes that keep the left-most non-zero segment
    fn parse_caret(&self, operand: &str, input: &str) -> Result<Vec<VersionConstraint>> {
        let partial = self.partial(operand, input, "caret")?;
        let major = match partial.major {
            Some(major) => major,
            None => return Ok(Vec::new()),
        };

        let upper = if major > 0 {
            ParsedVersion::new(bump(major, input)?, 0, 0)
        } else {
            match (partial.minor, partial.patch) {
                (None, _) => ParsedVersion::new(1, 0, 0),
                (Some(minor), _) if minor > 0 => ParsedVersion::new(0, bump(minor, input)?, 0),
                (Some(_), None) => ParsedVersion::new(0, 1, 0),
                (Some(_), Some(patch)) => ParsedVersion::new(0, 0, bump(patch, input)?),
            }
        };

        let constraints = self.lower_and_floor(&partial, upper);
        trace!("Expanded caret ^{} to {} {}", operand, constraints[0], constraints[1]);
        Ok(constraints)
    }

    /// `~V`: allow patch changes, or minor changes when only a major is given
    fn parse_tilde(&self, operand: &str, input: &str) -> Result<Vec<VersionConstraint>> {
        let partial = self.partial(operand, input, "tilde")?;
        let major = match partial.major {
            Some(major) => major,
            None => return Ok(Vec::new()),
        };

        let upper = match partial.minor {
            Some(minor) => ParsedVersion::new(major, bump(minor, input)?, 0),
            None => ParsedVersion::new(bump(major, input)?, 0, 0),
        };

        let constraints = self.lower_and_floor(&partial, upper);
        trace!("Expanded tilde ~{} to {} {}", operand, constraints[0], constraints[1]);
        Ok(constraints)
    }

    fn lower_and_floor(&self, partial: &PartialVersion, upper: ParsedVersion) -> Vec<VersionConstraint> {
        vec![
            VersionConstraint::new(Operator::GreaterThanOrEqual, partial.floor()),
            VersionConstraint::floor(Operator::LessThan, upper),
        ]
    }

    /// `1.2.x`, `1.*`, and comparators applied to them (`>=1.x`, `<1.2.x`)
    fn parse_x_range(&self, operator: Operator, text: &str, input: &str) -> Result<Vec<VersionConstraint>> {
        let partial = self.versions.parse_partial(text).map_err(|e| e.into_range(input))?;
        let negated = || {
            SieveError::range(
                input,
                format!("unsupported wildcard placement: \"!=\" cannot apply to \"{}\"", text),
            )
        };

        let major = match partial.major {
            Some(major) => major,
            None => {
                return match operator {
                    Operator::NotEqual => Err(negated()),
                    // Nothing sits above or below every version
                    Operator::LessThan | Operator::GreaterThan => Ok(vec![VersionConstraint::floor(
                        Operator::LessThan,
                        ParsedVersion::new(0, 0, 0),
                    )]),
                    _ => Ok(Vec::new()),
                };
            }
        };

        let low = partial.floor();
        let high = match partial.minor {
            Some(minor) => ParsedVersion::new(major, bump(minor, input)?, 0),
            None => ParsedVersion::new(bump(major, input)?, 0, 0),
        };

        let constraints = match operator {
            Operator::Equal => vec![
                VersionConstraint::new(Operator::GreaterThanOrEqual, low),
                VersionConstraint::floor(Operator::LessThan, high),
            ],
            Operator::GreaterThanOrEqual => vec![VersionConstraint::new(Operator::GreaterThanOrEqual, low)],
            Operator::GreaterThan => vec![VersionConstraint::new(Operator::GreaterThanOrEqual, high)],
            Operator::LessThan => vec![VersionConstraint::floor(Operator::LessThan, low)],
            Operator::LessThanOrEqual => vec![VersionConstraint::floor(Operator::LessThan, high)],
            Operator::NotEqual => return Err(negated()),
        };
        trace!("Expanded wildcard {}{} into {} constraint(s)", operator, text, constraints.len());
        Ok(constraints)
    }

    /// `A - B`: inclusive on both ends
    fn parse_hyphen(&self, from: &str, to: &str, input: &str) -> Result<Vec<VersionConstraint>> {
        if from.is_empty() || to.is_empty() {
            return Err(SieveError::range(input, "hyphen range is missing an operand"));
        }
        if from.contains(char::is_whitespace) || to.contains(char::is_whitespace) {
            return Err(SieveError::range(input, "hyphen range operands must be single versions"));
        }

        let lower = self.versions.parse_partial(from).map_err(|e| e.into_range(input))?;
        let upper = self.versions.parse_partial(to).map_err(|e| e.into_range(input))?;
        if lower.wildcard || upper.wildcard {
            return Err(SieveError::range(
                input,
                "unsupported wildcard placement: hyphen range operands must be versions",
            ));
        }

        let constraints = vec![
            VersionConstraint::new(Operator::GreaterThanOrEqual, lower.floor()),
            VersionConstraint::new(Operator::LessThanOrEqual, upper.floor()),
        ];
        trace!("Expanded hyphen {} - {} to {} {}", from, to, constraints[0], constraints[1]);
        Ok(constraints)
    }
}

/// Whether a version literal uses `x`, `X` or `*` as a numeric segment
fn has_wildcard(text: &str) -> bool {
    let core = text.split(['-', '+']).next().unwrap_or(text);
    core.trim_start_matches(['v', 'V'])
        .split('.')
        .any(|segment| matches!(segment, "x" | "X" | "*"))
}

fn bump(segment: u64, input: &str) -> Result<u64> {
    segment
        .checked_add(1)
        .ok_or_else(|| SieveError::range(input, "version segment overflows when bumped"))
}

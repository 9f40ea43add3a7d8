//! Version parsing module

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SieveConfig;
use crate::error::{Result, SieveError};
use crate::version::{is_numeric, validate_identifier, ParsedVersion};

lazy_static! {
    // MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]; identifiers are validated separately
    static ref STRICT_VERSION_RE: Regex = Regex::new(
        r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([^+]*))?(?:\+(.*))?$"
    ).unwrap();

    // Minor and patch may be omitted and default to 0
    static ref LOOSE_VERSION_RE: Regex = Regex::new(
        r"^([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([^+]*))?(?:\+(.*))?$"
    ).unwrap();

    // Range operands: every numeric segment may be a wildcard
    static ref PARTIAL_VERSION_RE: Regex = Regex::new(
        r"^([0-9]+|[xX*])(?:\.([0-9]+|[xX*]))?(?:\.([0-9]+|[xX*]))?(?:-([^+]*))?(?:\+(.*))?$"
    ).unwrap();
}

/// Plain `N.N.N` without leading zeros, the common case
fn fast_parse_simple(version: &str) -> Option<(u64, u64, u64)> {
    let bytes = version.as_bytes();
    let mut parts = [0u64; 3];
    let mut index = 0;
    let mut start = 0;

    for pos in 0..=bytes.len() {
        if pos == bytes.len() || bytes[pos] == b'.' {
            if pos == start || index > 2 {
                return None;
            }
            if pos - start > 1 && bytes[start] == b'0' {
                return None;
            }
            parts[index] = version[start..pos].parse().ok()?;
            index += 1;
            start = pos + 1;
            continue;
        }
        if !bytes[pos].is_ascii_digit() {
            return None;
        }
    }

    if index != 3 {
        return None;
    }
    Some((parts[0], parts[1], parts[2]))
}

/// A version operand of a range: missing or wildcard segments are `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: Vec<String>,
    pub build: Vec<String>,
    /// An explicit `x`, `X` or `*` segment was written
    pub wildcard: bool,
    pub raw: String,
}

impl PartialVersion {
    /// Nothing constrained (`*`, `x`)
    pub fn is_any(&self) -> bool {
        self.major.is_none()
    }

    /// Whether all three numeric segments are present
    pub fn is_complete(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// The lowest version this operand can denote, missing segments as 0
    pub fn floor(&self) -> ParsedVersion {
        ParsedVersion::from_parts(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
            self.prerelease.clone(),
            self.build.clone(),
            &self.raw,
        )
    }
}

/// Version parser bound to a set of options
#[derive(Debug, Clone, Copy)]
pub struct VersionParser<'c> {
    config: &'c SieveConfig,
}

impl<'c> VersionParser<'c> {
    /// Create a new version parser
    pub fn new(config: &'c SieveConfig) -> Self {
        VersionParser { config }
    }

    pub fn config(&self) -> &'c SieveConfig {
        self.config
    }

    /// Check if a version string is valid
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }

    /// Parse a version string into its structured form
    pub fn parse(&self, input: &str) -> Result<ParsedVersion> {
        let version = self.prepare(input)?;

        if let Some((major, minor, patch)) = fast_parse_simple(version) {
            return Ok(ParsedVersion::from_parts(major, minor, patch, Vec::new(), Vec::new(), input));
        }

        let grammar: &Regex = if self.config.strict_segments {
            &STRICT_VERSION_RE
        } else {
            &LOOSE_VERSION_RE
        };

        let caps = match grammar.captures(version) {
            Some(caps) => caps,
            None => {
                let reason = if self.config.strict_segments && LOOSE_VERSION_RE.is_match(version) {
                    "expected all of MAJOR.MINOR.PATCH"
                } else {
                    "does not match MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]"
                };
                return Err(SieveError::version(input, reason));
            }
        };

        let major = self.numeric(caps.get(1).map_or("0", |m| m.as_str()), input)?;
        let minor = self.numeric(caps.get(2).map_or("0", |m| m.as_str()), input)?;
        let patch = self.numeric(caps.get(3).map_or("0", |m| m.as_str()), input)?;
        let prerelease = self.prerelease(caps.get(4).map(|m| m.as_str()), input)?;
        let build = self.build(caps.get(5).map(|m| m.as_str()), input)?;

        Ok(ParsedVersion::from_parts(major, minor, patch, prerelease, build, input))
    }

    /// Parse a range operand where segments may be missing or wildcards
    pub fn parse_partial(&self, input: &str) -> Result<PartialVersion> {
        let version = self.prepare(input)?;

        let caps = PARTIAL_VERSION_RE
            .captures(version)
            .ok_or_else(|| SieveError::version(input, "does not match MAJOR[.MINOR[.PATCH]] with optional wildcards"))?;

        let mut segments: [Option<u64>; 3] = [None; 3];
        let mut wildcard = false;
        let mut open = false;

        for (i, segment) in segments.iter_mut().enumerate() {
            match caps.get(i + 1).map(|m| m.as_str()) {
                None => open = true,
                Some("x") | Some("X") | Some("*") => {
                    wildcard = true;
                    open = true;
                }
                Some(digits) => {
                    if open {
                        return Err(SieveError::version(
                            input,
                            "unsupported wildcard placement: a numeric segment follows a wildcard",
                        ));
                    }
                    *segment = Some(self.numeric(digits, input)?);
                }
            }
        }

        let prerelease = self.prerelease(caps.get(4).map(|m| m.as_str()), input)?;
        if wildcard && !prerelease.is_empty() {
            return Err(SieveError::version(
                input,
                "unsupported wildcard placement: wildcards cannot carry a prerelease",
            ));
        }
        let build = self.build(caps.get(5).map(|m| m.as_str()), input)?;

        Ok(PartialVersion {
            major: segments[0],
            minor: segments[1],
            patch: segments[2],
            prerelease,
            build,
            wildcard,
            raw: input.to_string(),
        })
    }

    /// Shared front checks: emptiness, length, `v` prefix, sign
    fn prepare<'a>(&self, input: &'a str) -> Result<&'a str> {
        if input.len() > self.config.max_version_length {
            return Err(SieveError::version(
                input,
                format!("exceeds the maximum length of {}", self.config.max_version_length),
            ));
        }

        let version = input.trim();
        if version.is_empty() {
            return Err(SieveError::version(input, "empty version string"));
        }

        let version = match version.strip_prefix(['v', 'V']) {
            Some(rest) if self.config.allow_v_prefix => rest,
            Some(_) => return Err(SieveError::version(input, "a leading \"v\" is not allowed")),
            None => version,
        };

        if version.starts_with('-') {
            return Err(SieveError::version(input, "version numbers must be non-negative"));
        }

        Ok(version)
    }

    fn numeric(&self, digits: &str, input: &str) -> Result<u64> {
        if !self.config.allow_leading_zeros && digits.len() > 1 && digits.starts_with('0') {
            return Err(SieveError::version(
                input,
                format!("numeric segment \"{}\" has a leading zero", digits),
            ));
        }
        digits
            .parse()
            .map_err(|_| SieveError::version(input, format!("numeric segment \"{}\" is out of range", digits)))
    }

    fn prerelease(&self, text: Option<&str>, input: &str) -> Result<Vec<String>> {
        let text = match text {
            None => return Ok(Vec::new()),
            // A bare `-0` prerelease is the same as none
            Some("0") => return Ok(Vec::new()),
            Some(text) => text,
        };

        let mut identifiers = Vec::new();
        for identifier in text.split('.') {
            validate_identifier(identifier, true, self.config.allow_leading_zeros)
                .map_err(|reason| SieveError::version(input, reason))?;
            if self.config.case_insensitive && !is_numeric(identifier) {
                identifiers.push(identifier.to_ascii_lowercase());
            } else {
                identifiers.push(identifier.to_string());
            }
        }
        Ok(identifiers)
    }

    fn build(&self, text: Option<&str>, input: &str) -> Result<Vec<String>> {
        let text = match text {
            None => return Ok(Vec::new()),
            Some(text) => text,
        };

        text.split('.')
            .map(|identifier| {
                validate_identifier(identifier, false, true)
                    .map(|_| identifier.to_string())
                    .map_err(|reason| SieveError::version(input, reason))
            })
            .collect()
    }
}

/// Whether a version literal spells the `-0` prerelease floor marker
pub(crate) fn has_floor_marker(literal: &str) -> bool {
    let without_build = literal.split('+').next().unwrap_or(literal);
    match without_build.split_once('-') {
        Some((_, prerelease)) => prerelease == "0",
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<ParsedVersion> {
        VersionParser::new(&SieveConfig::default()).parse(input)
    }

    #[test]
    fn test_parse_full_version() {
        let v = parse("1.2.3-alpha.1+build.5").unwrap();
        assert_eq!(v.core(), (1, 2, 3));
        assert_eq!(v.prerelease(), ["alpha", "1"]);
        assert_eq!(v.build(), ["build", "5"]);
        assert_eq!(v.raw(), "1.2.3-alpha.1+build.5");
    }

    #[test]
    fn test_fast_path() {
        assert_eq!(fast_parse_simple("1.2.3"), Some((1, 2, 3)));
        assert_eq!(fast_parse_simple("10.20.30"), Some((10, 20, 30)));
        assert_eq!(fast_parse_simple("01.2.3"), None);
        assert_eq!(fast_parse_simple("1.2"), None);
        assert_eq!(fast_parse_simple("1.2.3.4"), None);
        assert_eq!(fast_parse_simple("1..3"), None);
        assert_eq!(fast_parse_simple("1.2.3-beta"), None);
    }

    #[test]
    fn test_v_prefix() {
        assert_eq!(parse("v1.2.3").unwrap().core(), (1, 2, 3));
        assert_eq!(parse("V1.2.3").unwrap().core(), (1, 2, 3));

        let config = SieveConfig::default().with_v_prefix(false);
        let err = VersionParser::new(&config).parse("v1.2.3").unwrap_err();
        assert!(err.is_invalid_version());
    }

    #[test]
    fn test_loose_and_strict_segments() {
        assert_eq!(parse("1").unwrap().core(), (1, 0, 0));
        assert_eq!(parse("1.2").unwrap().core(), (1, 2, 0));
        assert_eq!(parse("1.2-beta").unwrap().prerelease(), ["beta"]);

        let config = SieveConfig::default().with_strict_segments(true);
        let parser = VersionParser::new(&config);
        assert!(parser.parse("1.2").is_err());
        assert!(parser.parse("1.2.3").is_ok());
    }

    #[test]
    fn test_rejections() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("invalid").is_err());
        assert!(parse("-1.0.0").is_err());
        assert!(parse("1.0.0-").is_err());
        assert!(parse("1.0.0-alpha..1").is_err());
        assert!(parse("1.0.0-alpha.").is_err());
        assert!(parse("1.0.0-al_pha").is_err());
        assert!(parse("1.0.0+").is_err());
        assert!(parse("1.0.0+build..1").is_err());
        assert!(parse("1.2.3.4").is_err());
        assert!(parse("99999999999999999999.0.0").is_err());
    }

    #[test]
    fn test_negative_reason() {
        match parse("-1.0.0").unwrap_err() {
            SieveError::InvalidVersion { reason, .. } => assert!(reason.contains("non-negative")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_leading_zeros() {
        assert!(parse("01.2.3").is_err());
        assert!(parse("1.02.3").is_err());
        assert!(parse("1.2.03").is_err());
        assert!(parse("1.2.3-01").is_err());
        assert!(parse("0.0.0").is_ok());
        assert!(parse("1.2.3+001").is_ok());

        let config = SieveConfig::default().with_leading_zeros(true);
        let v = VersionParser::new(&config).parse("01.002.3-01").unwrap();
        assert_eq!(v.core(), (1, 2, 3));
        assert_eq!(v.prerelease(), ["01"]);
    }

    #[test]
    fn test_max_length() {
        let config = SieveConfig::default().with_max_version_length(5).unwrap();
        let parser = VersionParser::new(&config);
        assert!(parser.parse("1.2.3").is_ok());
        assert!(parser.parse("1.2.30").is_err());
    }

    #[test]
    fn test_zero_prerelease_is_absent() {
        let v = parse("1.2.3-0").unwrap();
        assert!(!v.is_prerelease());
        assert_eq!(parse("1.2.3-0.1").unwrap().prerelease(), ["0", "1"]);
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(parse("1.0.0-RC.1").unwrap().prerelease(), ["RC", "1"]);

        let config = SieveConfig::default().with_case_insensitive(true);
        let v = VersionParser::new(&config).parse("1.0.0-RC.1+BUILD").unwrap();
        assert_eq!(v.prerelease(), ["rc", "1"]);
        assert_eq!(v.build(), ["BUILD"]);
    }

    #[test]
    fn test_parse_partial() {
        let config = SieveConfig::default();
        let parser = VersionParser::new(&config);

        let p = parser.parse_partial("1.2").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), Some(2), None));
        assert!(!p.wildcard);
        assert!(!p.is_complete());

        let p = parser.parse_partial("1.x.*").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), None, None));
        assert!(p.wildcard);

        assert!(parser.parse_partial("*").unwrap().is_any());
        assert!(parser.parse_partial("1.x.3").is_err());
        assert!(parser.parse_partial("1.x-beta").is_err());
        assert_eq!(parser.parse_partial("1.2.3-beta").unwrap().floor().prerelease(), ["beta"]);
    }

    #[test]
    fn test_floor_marker() {
        assert!(has_floor_marker("2.0.0-0"));
        assert!(has_floor_marker("v2.0.0-0+build"));
        assert!(!has_floor_marker("2.0.0-0.1"));
        assert!(!has_floor_marker("2.0.0"));
        assert!(!has_floor_marker("2.0.0-alpha"));
    }
}

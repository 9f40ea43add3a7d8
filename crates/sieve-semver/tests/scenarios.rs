//! End-to-end scenarios through the facade

use std::cmp::Ordering;

use sieve_semver::{Boundary, DialectKind, Operator, RangeLogic, Sieve, SieveConfig, SieveError};

fn includes(version: &str, ranges: &[&str]) -> bool {
    Sieve::default().includes(version, ranges).unwrap()
}

#[test]
fn exact_versions() {
    assert!(includes("1.2.3", &["1.2.3"]));
    assert!(!includes("1.2.3", &["1.2.4"]));
}

#[test]
fn caret_and_tilde() {
    assert!(includes("1.2.4", &["^1.2.3"]));
    assert!(!includes("2.0.0", &["^1.2.3"]));
    assert!(!includes("1.3.0", &["~1.2.3"]));
    assert!(includes("1.2.4", &["~1.2.3"]));
}

#[test]
fn shorthand_expansion() {
    let sieve = Sieve::default();

    let caret = sieve.parse_range("^1.2.3").unwrap();
    let constraints: Vec<String> = caret.constraints().map(|c| c.to_string()).collect();
    assert_eq!(constraints, [">=1.2.3", "<2.0.0-0"]);
    let upper = caret.constraints().nth(1).unwrap();
    assert_eq!(upper.operator(), Operator::LessThan);
    assert_eq!(upper.boundary(), Boundary::PrereleaseFloor);

    let tilde = sieve.parse_range("~1.2.3").unwrap();
    let constraints: Vec<String> = tilde.constraints().map(|c| c.to_string()).collect();
    assert_eq!(constraints, [">=1.2.3", "<1.3.0-0"]);
}

#[test]
fn or_groups_short_circuit() {
    let sieve = Sieve::default();
    let range = sieve.parse_range("^1.0 || ^2.0").unwrap();
    assert_eq!(range.logic(), RangeLogic::Or);
    assert_eq!(range.groups().len(), 2);

    assert!(sieve.satisfies("1.0.0", "^1.0 || ^2.0").unwrap());
    assert!(sieve.satisfies("2.0.0", "^1.0 || ^2.0").unwrap());
    assert!(!sieve.satisfies("3.0.0", "^1.0 || ^2.0").unwrap());
}

#[test]
fn prerelease_gate_default() {
    assert!(!includes("1.0.0-alpha", &[">=1.0.0"]));
    assert!(!includes("1.0.0-alpha", &["<2.0.0"]));
    assert!(!includes("1.0.0-alpha", &["*"]));

    let config = SieveConfig::default().with_include_prereleases(true);
    let sieve = Sieve::default().with_config(config).unwrap();
    assert!(sieve.includes("1.0.0-alpha", &[">=0.9.0"]).unwrap());
    assert!(sieve.includes("1.0.0-alpha", &["<2.0.0"]).unwrap());
    assert!(!sieve.includes("1.0.0-alpha", &[">=1.0.0"]).unwrap());
}

#[test]
fn prerelease_target_of_the_same_core() {
    assert!(includes("2.0.0-rc.0", &["<2.0.0-rc.1"]));
    assert!(!includes("2.0.0-rc.2", &["<2.0.0-rc.1"]));
    assert!(!includes("3.0.0-rc.0", &["^2.0.0"]));
}

#[test]
fn prerelease_between_ranges() {
    let report = Sieve::default()
        .match_ranges("2.0.0-beta.2", &["^2.0", ">=1.9 <2.0.0-rc.1"])
        .unwrap();
    assert!(report.matched);
    // below 2.0.0, so only the range reaching up to rc.1 holds it
    assert_eq!(report.matched_ranges, [">=1.9 <2.0.0-rc.1"]);
    assert_eq!(report.normalized_ranges, [">=2.0.0 <3.0.0-0", ">=1.9.0 <2.0.0-rc.1"]);
}

#[test]
fn zero_prerelease_matches_its_release() {
    assert!(includes("1.0.0-0", &["1.0.0-0"]));
    assert!(includes("1.0.0", &["1.0.0-0"]));
    assert!(includes("1.0.0", &["<=1.0.0-0"]));
    assert!(!includes("1.0.0", &[">1.0.0-0"]));
    assert!(includes("2.0.0", &["1.0.0 - 2.0.0-0"]));
    assert!(!includes("2.0.0", &["<2.0.0-0"]));
    assert!(Sieve::default().parse_version("1.0.0-0").unwrap().prerelease().is_empty());
}

#[test]
fn parse_failures() {
    let sieve = Sieve::default();
    assert!(matches!(sieve.parse_version("invalid"), Err(SieveError::InvalidVersion { .. })));
    assert!(matches!(sieve.parse_range(""), Err(SieveError::InvalidRange { .. })));
    assert!(matches!(sieve.parse_range("1.0 || "), Err(SieveError::InvalidRange { .. })));
    assert!(matches!(sieve.parse_range("1.x.3"), Err(SieveError::InvalidRange { .. })));
    assert!(sieve.includes("1.0.0", &["1.0.0", "^"]).is_err());

    let err = sieve.parse_version("01.2.3").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid version string \"01.2.3\": numeric segment \"01\" has a leading zero"
    );
}

#[test]
fn ordering_properties() {
    let sieve = Sieve::default();
    assert_eq!(sieve.compare("1.0.0-alpha", "1.0.0").unwrap(), Ordering::Less);
    assert_eq!(sieve.compare("1.0.0", "1.0.0-alpha").unwrap(), Ordering::Greater);
    assert_eq!(sieve.compare("1.0.0-alpha.1", "1.0.0-alpha.beta").unwrap(), Ordering::Less);
    assert_eq!(sieve.compare("1.0.0+build1", "1.0.0+build2").unwrap(), Ordering::Equal);
}

#[test]
fn normalized_ranges_reparse_to_the_same_form() {
    let sieve = Sieve::default();
    for range in ["^1.2.3", "~0.2", "1.2.x || >=3.0.0 <3.1", "1.0 - 2.0", ">=1.x", "<=1.2.x", "*"] {
        let normalized = sieve.parse_range(range).unwrap().to_normalized_string();
        let again = sieve.parse_range(&normalized).unwrap().to_normalized_string();
        assert_eq!(normalized, again, "{}", range);
    }
}

#[test]
fn npm_dialect() {
    let npm = Sieve::new(DialectKind::Npm);
    assert!(npm.includes("1.2.9", &["~>1.2.3"]).unwrap());
    assert!(npm.includes("=1.2.3", &["1.2.3"]).unwrap());
    assert!(npm.includes("4.0.0", &["latest"]).unwrap());
    assert!(npm.includes("4.0.0", &[""]).unwrap());
}

#[test]
fn composer_dialect() {
    let composer = Sieve::new(DialectKind::Composer);
    assert!(composer.includes("1.5.0", &[">=1.0,<2.0"]).unwrap());
    assert!(composer.includes("3.1.0", &["^1.0|^3.0"]).unwrap());
    assert!(!composer.includes("1.5.0", &["<>1.5.0"]).unwrap());
    assert!(composer.includes("1.2.7", &["1.2.x-dev"]).unwrap());
    assert!(composer.includes("dev-master", &["dev-master"]).unwrap());
    assert!(composer.includes("2.1.0-BETA1", &[">=2.1.0-beta1@beta"]).unwrap());

    assert_eq!(composer.parse_range("~1.2").unwrap().to_normalized_string(), ">=1.2.0 <2.0.0-0");
    assert!(composer.includes("1.5.0", &["~1.2"]).unwrap());
    assert!(!composer.includes("2.0.0", &["~1.2"]).unwrap());
    assert!(!composer.includes("1.3.0", &["~1.2.3"]).unwrap());

    let report = composer.match_ranges("1.0.0", &["~1.0@stable"]).unwrap();
    assert_eq!(report.matched_ranges, ["~1.0@stable"]);
}

#[test]
fn maven_dialect() {
    let maven = Sieve::new(DialectKind::Maven);
    assert!(maven.includes("1.5", &["[1.0,2.0)"]).unwrap());
    assert!(!maven.includes("2.0", &["[1.0,2.0)"]).unwrap());
    assert!(maven.includes("0.9", &["(,1.0],[1.2,)"]).unwrap());
    assert!(!maven.includes("1.1", &["(,1.0],[1.2,)"]).unwrap());
    assert!(maven.includes("1.2", &["[1.2]"]).unwrap());
    assert!(maven.includes("7.3.1", &["LATEST"]).unwrap());
    assert!(maven.parse_range("[1.0,2.0").is_err());
}

#[test]
fn go_dialect() {
    let go = Sieve::new(DialectKind::Go);
    assert!(go.includes("v1.4.2", &[">=v1.4.0 <v2.0.0"]).unwrap());
    assert!(go.includes("v2.3.0+incompatible", &["^2.0.0"]).unwrap());
    assert!(go.includes("v1.0.0", &["latest"]).unwrap());
    assert!(go.includes("1.4.2", &["*"]).is_err());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sieve_semver::{Comparator, DialectKind, RangeParser, Sieve, SieveConfig, VersionParser};

fn bench_parse_versions(c: &mut Criterion) {
    let config = SieveConfig::default();
    let parser = VersionParser::new(&config);
    let versions = [
        "1.2.3",
        "v1.2.3",
        "1.2.3-beta.1",
        "2.4.0+build.5",
        "1.0.0-alpha.beta.11",
        "10.20.30",
        "1.2",
    ];

    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(parser.parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_parse_ranges(c: &mut Criterion) {
    let config = SieveConfig::default();
    let parser = RangeParser::new(&config);
    let ranges = [
        ">=1.2.3 <2.0.0",
        "^1.2.3 || ~2.4",
        "1.2.* || 2.*",
        "1.2.3 - 2.0.0",
        "~1.2.1 >=1.2.3",
        "!=1.5.0 !=1.5.1",
        ">1.0 <3.0 || >=4.0",
    ];

    c.bench_function("parse_ranges", |b| {
        b.iter(|| {
            for range in ranges {
                black_box(parser.parse(black_box(range)).ok());
            }
        })
    });
}

fn bench_compare(c: &mut Criterion) {
    let config = SieveConfig::default();
    let parser = VersionParser::new(&config);
    let pairs: Vec<_> = [
        ("1.2.3", "1.2.4"),
        ("2.4.0-alpha", "2.4.0"),
        ("1.0.0-alpha.1", "1.0.0-alpha.beta"),
        ("1.2.3+build.1", "1.2.3+build.2"),
        ("1.0.0-rc.11", "1.0.0-rc.2"),
    ]
    .iter()
    .map(|(a, b)| (parser.parse(a).expect("valid version"), parser.parse(b).expect("valid version")))
    .collect();

    c.bench_function("compare", |b| {
        b.iter(|| {
            for (a, bver) in &pairs {
                black_box(Comparator::compare(black_box(a), black_box(bver)));
            }
        })
    });
}

fn bench_includes(c: &mut Criterion) {
    let sieve = Sieve::default();
    let cases = [
        ("1.2.3", "^1.2.0"),
        ("1.2.3-beta", "^1.2.3"),
        ("2.4.5", "~2.4"),
        ("1.2.3", ">=1.2.3 <2.0.0"),
        ("1.9999.9999", "<2.0.0"),
        ("1.2.3", "1.2.* || 2.*"),
    ];

    c.bench_function("sieve_includes", |b| {
        b.iter(|| {
            for (version, range) in cases {
                black_box(sieve.includes(black_box(version), &[black_box(range)]).ok());
            }
        })
    });
}

fn bench_composer_ranges(c: &mut Criterion) {
    let sieve = Sieve::new(DialectKind::Composer);
    let cases = [
        ("1.2.3", ">=1.0,<2.0 | ^3.0"),
        ("2.1.0", "~2.1@dev"),
        ("dev-master", "dev-master"),
    ];

    c.bench_function("composer_match", |b| {
        b.iter(|| {
            for (version, range) in cases {
                black_box(sieve.match_ranges(black_box(version), &[black_box(range)]).ok());
            }
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let sieve = Sieve::default();
    let versions = vec![
        "1.0", "0.1", "0.1.1", "3.2.1", "2.4.0-alpha", "2.4.0", "50.2", "1.2.3", "2.4.5", "2.4.5-rc.1",
    ];

    c.bench_function("sieve_sort", |b| {
        b.iter(|| {
            black_box(sieve.sort(black_box(&versions)).ok());
        })
    });
}

criterion_group!(
    benches,
    bench_parse_versions,
    bench_parse_ranges,
    bench_compare,
    bench_includes,
    bench_composer_ranges,
    bench_sort
);
criterion_main!(benches);

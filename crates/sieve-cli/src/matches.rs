//! Match command - report which ranges a version satisfies.

use anyhow::{Context, Result};
use clap::Args;

use sieve_semver::Sieve;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Version to check
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Ranges to check against
    #[arg(value_name = "RANGES", required = true)]
    pub ranges: Vec<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

pub fn execute(args: MatchArgs, sieve: &Sieve) -> Result<i32> {
    let report = sieve
        .match_ranges(&args.version, &args.ranges)
        .with_context(|| format!("Failed to evaluate {}", args.version))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(if report.matched { 0 } else { 1 })
}

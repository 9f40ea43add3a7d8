//! Includes command - check a version against one or more ranges.

use anyhow::{Context, Result};
use clap::Args;

use sieve_semver::Sieve;

#[derive(Args, Debug)]
pub struct IncludesArgs {
    /// Version to check
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Ranges to check against; any one matching is enough
    #[arg(value_name = "RANGES", required = true)]
    pub ranges: Vec<String>,
}

pub fn execute(args: IncludesArgs, sieve: &Sieve) -> Result<i32> {
    let matched = sieve
        .includes(&args.version, &args.ranges)
        .with_context(|| format!("Failed to evaluate {}", args.version))?;

    println!("{}", matched);
    Ok(if matched { 0 } else { 1 })
}

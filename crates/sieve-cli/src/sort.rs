//! Sort command - order versions by precedence.

use anyhow::{Context, Result};
use clap::Args;

use sieve_semver::Sieve;

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Versions to sort
    #[arg(value_name = "VERSIONS", required = true)]
    pub versions: Vec<String>,

    /// Sort from highest to lowest
    #[arg(short, long)]
    pub reverse: bool,
}

pub fn execute(args: SortArgs, sieve: &Sieve) -> Result<i32> {
    let sorted = if args.reverse {
        sieve.rsort(&args.versions)
    } else {
        sieve.sort(&args.versions)
    }
    .context("Failed to sort versions")?;

    for version in sorted {
        println!("{}", version);
    }
    Ok(0)
}

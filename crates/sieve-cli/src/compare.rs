//! Compare command - order two versions by precedence.

use anyhow::{Context, Result};
use clap::Args;
use std::cmp::Ordering;

use sieve_semver::Sieve;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Left-hand version
    #[arg(value_name = "A")]
    pub a: String,

    /// Right-hand version
    #[arg(value_name = "B")]
    pub b: String,
}

pub fn execute(args: CompareArgs, sieve: &Sieve) -> Result<i32> {
    let ordering = sieve
        .compare(&args.a, &args.b)
        .with_context(|| format!("Failed to compare {} with {}", args.a, args.b))?;

    println!("{}", ordering_code(ordering));
    Ok(0)
}

fn ordering_code(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

mod compare;
mod config;
mod includes;
mod matches;
mod sort;

use config::SieveToml;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

use sieve_semver::{DialectKind, Sieve};

/// Exit code for malformed versions, ranges or configuration
const ERROR_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(about = "Check versions against ranges across package ecosystems")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Range dialect: semver, npm, composer, maven or go
    #[arg(short, long, global = true, value_name = "NAME")]
    dialect: Option<DialectKind>,

    /// Load options from a TOML file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Let prereleases satisfy any range they fall into
    #[arg(long, global = true)]
    include_prereleases: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exit 0 when the version satisfies any range, 1 otherwise
    Includes(includes::IncludesArgs),

    /// Print a JSON report of the ranges a version satisfies
    Match(matches::MatchArgs),

    /// Print -1, 0 or 1 ordering two versions
    Compare(compare::CompareArgs),

    /// Print versions in precedence order
    Sort(sort::SortArgs),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Build the facade from the dialect, an optional config file and flags.
/// `--dialect` wins over the file's dialect; file options replace the
/// dialect's preset options.
fn build_sieve(cli: &Cli) -> Result<Sieve> {
    let file = match &cli.config {
        Some(path) => SieveToml::load(path)?,
        None => SieveToml::default(),
    };

    let kind = cli.dialect.or(file.dialect).unwrap_or_default();
    let sieve = Sieve::new(kind);
    let mut options = file.options.unwrap_or_else(|| sieve.config().clone());
    if cli.include_prereleases {
        options = options.with_include_prereleases(true);
    }

    log::debug!("Using dialect {} with options {}", kind, options.fingerprint());
    Ok(sieve.with_config(options)?)
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let sieve = build_sieve(&cli)?;
    match cli.command {
        Commands::Includes(args) => includes::execute(args, &sieve),
        Commands::Match(args) => matches::execute(args, &sieve),
        Commands::Compare(args) => compare::execute(args, &sieve),
        Commands::Sort(args) => sort::execute(args, &sieve),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use sieve_semver::{DialectKind, SieveConfig};

/// The sieve configuration file structure (sieve.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SieveToml {
    /// Dialect used when `--dialect` is not given
    pub dialect: Option<DialectKind>,

    /// Parser and evaluator options; replaces the dialect's preset when present
    pub options: Option<SieveConfig>,
}

impl SieveToml {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SieveToml = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if let Some(options) = &config.options {
            options
                .validate()
                .with_context(|| format!("Invalid options in {}", path.display()))?;
        }
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

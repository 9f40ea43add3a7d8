//! Plain SemVer 2.0.0

use super::{Dialect, DialectKind};
use crate::config::SieveConfig;

/// The shared grammar with default options and no rewriting
#[derive(Debug, Clone, Default)]
pub struct SemverDialect {
    config: SieveConfig,
}

impl SemverDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dialect for SemverDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Semver
    }

    fn config(&self) -> &SieveConfig {
        &self.config
    }
}

//! Configuration for the `Calculator` facade

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{BitWidth, BitsError, Result, DEFAULT_PARALLEL_MIN_LEN, DEFAULT_WIDTH_BITS};

/// Settings shared by every query a `Calculator` answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateCfg {
    /// Bit planes to inspect (1..=64)
    pub width_bits: u32,

    /// Tally planes on the rayon pool for long inputs
    pub parallel: bool,

    /// Shortest input that takes the parallel path
    pub parallel_min_len: usize,
}

impl Default for AggregateCfg {
    fn default() -> Self {
        Self {
            width_bits: DEFAULT_WIDTH_BITS,
            parallel: false,
            parallel_min_len: DEFAULT_PARALLEL_MIN_LEN,
        }
    }
}

impl AggregateCfg {
    /// Check invariants and return the validated width.
    pub fn validate(&self) -> Result<BitWidth> {
        let width = BitWidth::new(self.width_bits)?;
        if self.parallel_min_len == 0 {
            return Err(BitsError::Config("parallel_min_len must be non-zero".to_string()));
        }
        Ok(width)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AggregateCfg = toml::from_str(s)?;
        if let Err(e) = cfg.validate() {
            tracing::warn!("rejected aggregate config: {}", e);
            return Err(e);
        }
        Ok(cfg)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&content)?;
        tracing::info!("Loaded aggregate config from {}", path.display());
        Ok(cfg)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

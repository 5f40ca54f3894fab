//! Mining threshold configuration
//!
//! Thresholds are named configuration rather than magic numbers so tests can
//! tighten or loosen a single pair family independently.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/tendency/config/mining.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/mining.toml");

/// Minimum cohort size and within-cohort confidence for one pair family
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PairThresholds {
    /// Smallest X-cohort worth reporting on
    pub min_support: usize,
    /// Smallest share of the cohort the best Y-value must account for
    pub min_confidence: f64,
}

impl PairThresholds {
    pub const fn new(min_support: usize, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
        }
    }
}

/// Thresholds for every generator family
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub os_study: PairThresholds,
    pub color_hobby: PairThresholds,
    pub region_language: PairThresholds,
    pub focus_course: PairThresholds,
    pub generic: PairThresholds,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            os_study: PairThresholds::new(3, 0.50),
            color_hobby: PairThresholds::new(2, 0.50),
            region_language: PairThresholds::new(3, 0.50),
            focus_course: PairThresholds::new(3, 0.50),
            generic: PairThresholds::new(2, 0.50),
        }
    }
}

impl MiningConfig {
    /// Parse a TOML document; absent families keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid mining config: {}", e)))
    }

    /// Load config with override resolution: data-dir file first, then the
    /// embedded defaults.
    pub fn load() -> Self {
        if let Some(path) = config_override_path() {
            if path.exists() {
                match fs::read_to_string(&path).map_err(Error::Io).and_then(|c| Self::from_toml(&c)) {
                    Ok(config) => {
                        debug!(path = %path.display(), "Loaded mining config override");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Ignoring bad mining config override");
                    }
                }
            }
        }

        // Embedded default is compiled in and must parse
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_default()
    }
}

/// Location of the per-machine override file
fn config_override_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tendency").join("config").join("mining.toml"))
}

//! Configuration loading and validation.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Maximum size in bytes for a master data or fleet snapshot file.
pub const MAX_MASTER_FILE_BYTES: usize = 16 * 1024 * 1024;

/// Maximum size in bytes for a configuration file.
pub const MAX_CONFIG_FILE_BYTES: usize = 64 * 1024;

/// Ships per fleet in the target domain (combined escort fleets go up to 7).
pub const MAX_FLEET_SIZE: usize = 7;

/// Equipment slots per ship in the target domain.
pub const MAX_SLOTS: usize = 5;

/// Snapshots with more entries than this are rejected by the loader.
pub const MAX_SNAPSHOT_SHIPS: usize = 24;

/// Gear type codes (third element of the category-type tuple) counted as
/// anti-air fighters: fighters, bombers, seaplane bombers/fighters and jets.
pub const DEFAULT_FIGHTER_TYPE2: [i64; 8] = [6, 7, 8, 11, 45, 56, 57, 58];

/// Category code (second element of the category-type tuple) of reconnaissance planes.
pub const DEFAULT_RECON_CATEGORY: i64 = 7;

/// Ship IDs above this value live in the abyssal namespace.
pub const DEFAULT_ABYSSAL_ID_THRESHOLD: i64 = 1500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: usize },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Type codes whose gear contributes to fighter power.
    #[serde(default = "default_fighter_type2")]
    pub fighter_type2: BTreeSet<i64>,
    /// Category code identifying reconnaissance planes.
    #[serde(default = "default_recon_category")]
    pub recon_category: i64,
    #[serde(default = "default_abyssal_id_threshold")]
    pub abyssal_id_threshold: i64,
}

fn default_fighter_type2() -> BTreeSet<i64> {
    DEFAULT_FIGHTER_TYPE2.into_iter().collect()
}

fn default_recon_category() -> i64 {
    DEFAULT_RECON_CATEGORY
}

fn default_abyssal_id_threshold() -> i64 {
    DEFAULT_ABYSSAL_ID_THRESHOLD
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            fighter_type2: default_fighter_type2(),
            recon_category: DEFAULT_RECON_CATEGORY,
            abyssal_id_threshold: DEFAULT_ABYSSAL_ID_THRESHOLD,
        }
    }
}

impl EstimatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EstimatorConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        let size = fs::metadata(path).map_err(io_err)?.len();
        if size > MAX_CONFIG_FILE_BYTES as u64 {
            return Err(ConfigError::TooLarge {
                size,
                max: MAX_CONFIG_FILE_BYTES,
            });
        }
        let content = fs::read_to_string(path).map_err(io_err)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fighter_type2.is_empty() {
            return Err(ConfigError::Invalid(
                "fighter_type2 must list at least one type code".to_string(),
            ));
        }
        if self.recon_category <= 0 {
            return Err(ConfigError::Invalid(format!(
                "recon_category must be positive, got {}",
                self.recon_category
            )));
        }
        if self.abyssal_id_threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "abyssal_id_threshold must be non-negative, got {}",
                self.abyssal_id_threshold
            )));
        }
        Ok(())
    }

    pub fn is_fighter_type(&self, type2: i64) -> bool {
        self.fighter_type2.contains(&type2)
    }
}

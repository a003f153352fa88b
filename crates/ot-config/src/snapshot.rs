//! Configuration snapshots for report reproducibility.
//!
//! A snapshot captures the effective configuration (after CLI overrides)
//! so a report can be traced back to the exact thresholds that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::EngineConfig;
use crate::resolve::{ConfigSource, ResolvedConfigPath};
use crate::validate::{ValidationError, ValidationResult};

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Path the config file was loaded from.
    #[serde(default)]
    pub config_path: Option<String>,

    /// Source of the configuration.
    pub config_source: ConfigSource,

    /// SHA-256 of the canonical JSON form of the effective config.
    pub config_hash: String,

    /// The effective configuration values.
    pub effective: EngineConfig,
}

impl ConfigSnapshot {
    /// Snapshot the effective config loaded from `resolved`.
    pub fn new(config: &EngineConfig, resolved: &ResolvedConfigPath) -> ValidationResult<Self> {
        Ok(ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            config_path: resolved.path.as_ref().map(|p| p.display().to_string()),
            config_source: resolved.source,
            config_hash: config_hash(config)?,
            effective: config.clone(),
        })
    }

    /// Snapshot built-in defaults.
    pub fn from_defaults() -> ValidationResult<Self> {
        Self::new(&EngineConfig::default(), &ResolvedConfigPath::default())
    }

    /// Whether two snapshots describe the same effective configuration.
    pub fn same_config(&self, other: &ConfigSnapshot) -> bool {
        self.config_hash == other.config_hash
    }
}

/// Hash the canonical JSON serialization of a config.
pub fn config_hash(config: &EngineConfig) -> ValidationResult<String> {
    let canonical =
        serde_json::to_vec(config).map_err(|e| ValidationError::ParseError(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}

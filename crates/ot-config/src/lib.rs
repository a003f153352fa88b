//! Outbreak Trends configuration loading and validation.
//!
//! This crate provides:
//! - The typed engine configuration (window length, lookback, thresholds)
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation
//! - Config snapshots embedded in reports for reproducibility

pub mod engine;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use engine::{EmergingStatus, EngineConfig};
pub use resolve::{resolve_config, ConfigSource, ResolvedConfigPath};
pub use snapshot::ConfigSnapshot;
pub use validate::{validate_engine_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Resolve and parse the engine configuration without validating it.
///
/// Falls back to built-in defaults when no file is found. Callers that
/// layer overrides on top validate the merged result themselves.
pub fn read_config(
    cli_path: Option<&std::path::Path>,
) -> ValidationResult<(EngineConfig, ResolvedConfigPath)> {
    let resolved = resolve_config(cli_path);
    let config = match resolved.path {
        Some(ref path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    Ok((config, resolved))
}

/// Resolve, load and validate the engine configuration.
pub fn load_config(
    cli_path: Option<&std::path::Path>,
) -> ValidationResult<(EngineConfig, ResolvedConfigPath)> {
    let (config, resolved) = read_config(cli_path)?;
    validate_engine_config(&config)?;
    Ok((config, resolved))
}

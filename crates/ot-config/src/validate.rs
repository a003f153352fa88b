//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::engine::EngineConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for ot_common::Error {
    fn from(err: ValidationError) -> Self {
        ot_common::Error::Config(err.to_string())
    }
}

/// Validate the engine configuration semantically.
pub fn validate_engine_config(config: &EngineConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.period_length == 0 {
        return Err(ValidationError::InvalidValue {
            field: "period_length".to_string(),
            message: "Must be at least 1 day".to_string(),
        });
    }

    if config.period_count == 0 {
        return Err(ValidationError::InvalidValue {
            field: "period_count".to_string(),
            message: "Must retain at least 1 period".to_string(),
        });
    }

    // Keeps the lookback expressible as a chrono day offset.
    if config.lookback_days() > 100_000 {
        return Err(ValidationError::InvalidValue {
            field: "period_length * period_count".to_string(),
            message: format!("Lookback of {} days is too long", config.lookback_days()),
        });
    }

    Ok(())
}

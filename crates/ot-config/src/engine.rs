//! Engine configuration types.
//!
//! Every field has a built-in default, so an empty file (or no file at all)
//! yields the standard 6 × 5-day lookback.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Days per period.
pub const DEFAULT_PERIOD_LENGTH: usize = 5;

/// Number of trailing periods retained per country.
pub const DEFAULT_PERIOD_COUNT: usize = 6;

/// Period total at or above which a falling outbreak is still `Crushing`.
pub const DEFAULT_WINNING_FLOOR: u64 = 10;

/// Status assigned when a period rises from a zero-count predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergingStatus {
    /// Report a new outbreak (`Starting`).
    #[default]
    Starting,
    /// Treat the rise as unbounded growth (`Losing`).
    Losing,
}

impl std::fmt::Display for EmergingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmergingStatus::Starting => write!(f, "starting"),
            EmergingStatus::Losing => write!(f, "losing"),
        }
    }
}

/// Trend engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub schema_version: String,

    /// Days per period (`PERIOD_LENGTH`).
    pub period_length: usize,

    /// Number of trailing periods (`PERIOD_COUNT`).
    pub period_count: usize,

    /// Falling periods below this total are `Winning`, otherwise `Crushing`.
    pub winning_floor: u64,

    pub emerging_status: EmergingStatus,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            period_length: DEFAULT_PERIOD_LENGTH,
            period_count: DEFAULT_PERIOD_COUNT,
            winning_floor: DEFAULT_WINNING_FLOOR,
            emerging_status: EmergingStatus::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a `.toml` or `.json` file (chosen by extension, JSON otherwise).
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parse from JSON text.
    pub fn from_json_str(content: &str) -> ValidationResult<Self> {
        serde_json::from_str(content).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> ValidationResult<Self> {
        toml::from_str(content).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Total days covered by the full lookback.
    pub fn lookback_days(&self) -> usize {
        self.period_length.saturating_mul(self.period_count)
    }

    pub fn with_period_length(mut self, days: usize) -> Self {
        self.period_length = days;
        self
    }

    pub fn with_period_count(mut self, count: usize) -> Self {
        self.period_count = count;
        self
    }

    pub fn with_winning_floor(mut self, floor: u64) -> Self {
        self.winning_floor = floor;
        self
    }

    pub fn with_emerging_status(mut self, status: EmergingStatus) -> Self {
        self.emerging_status = status;
        self
    }
}

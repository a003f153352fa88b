//! Outbreak status classification.
//!
//! `classify` is total: every combination of period total, growth and
//! previous total maps to exactly one status. Zero-activity rules are
//! decided before growth-based rules.

use ot_config::{EmergingStatus, EngineConfig};
use serde::{Deserialize, Serialize};

use crate::growth::Growth;

/// Qualitative outbreak state of one period, ordered from "no outbreak"
/// through "fully defeated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutbreakStatus {
    None,
    Starting,
    Losing,
    Flattening,
    Crushing,
    Winning,
    Won,
}

impl OutbreakStatus {
    /// Every status, in severity order.
    pub const ALL: [OutbreakStatus; 7] = [
        OutbreakStatus::None,
        OutbreakStatus::Starting,
        OutbreakStatus::Losing,
        OutbreakStatus::Flattening,
        OutbreakStatus::Crushing,
        OutbreakStatus::Winning,
        OutbreakStatus::Won,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutbreakStatus::None => "none",
            OutbreakStatus::Starting => "starting",
            OutbreakStatus::Losing => "losing",
            OutbreakStatus::Flattening => "flattening",
            OutbreakStatus::Crushing => "crushing",
            OutbreakStatus::Winning => "winning",
            OutbreakStatus::Won => "won",
        }
    }

    /// Counts are going up in this period.
    pub fn is_rising(&self) -> bool {
        matches!(self, OutbreakStatus::Starting | OutbreakStatus::Losing)
    }
}

impl std::fmt::Display for OutbreakStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tunable inputs of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    /// Falling periods with a total at or above this are `Crushing`,
    /// below it `Winning`.
    pub winning_floor: u64,
    /// Status for a period rising from a zero-count predecessor.
    pub emerging_status: EmergingStatus,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for StatusThresholds {
    fn from(config: &EngineConfig) -> Self {
        StatusThresholds {
            winning_floor: config.winning_floor,
            emerging_status: config.emerging_status,
        }
    }
}

/// Classify one period.
///
/// `previous_total` is ignored for `Growth::Baseline`: the oldest period is
/// `None` when empty and `Flattening` otherwise.
pub fn classify(
    total_count: u64,
    growth: Growth,
    previous_total: u64,
    thresholds: &StatusThresholds,
) -> OutbreakStatus {
    if growth == Growth::Baseline {
        return if total_count == 0 {
            OutbreakStatus::None
        } else {
            OutbreakStatus::Flattening
        };
    }

    if total_count == 0 {
        return if previous_total == 0 {
            OutbreakStatus::None
        } else {
            OutbreakStatus::Won
        };
    }

    if previous_total == 0 {
        return emerging(thresholds);
    }

    match growth {
        Growth::Rate(rate) if rate > 0 => OutbreakStatus::Losing,
        Growth::Rate(0) => OutbreakStatus::Flattening,
        Growth::Rate(_) if total_count >= thresholds.winning_floor => OutbreakStatus::Crushing,
        Growth::Rate(_) => OutbreakStatus::Winning,
        Growth::EmergingFromZero => emerging(thresholds),
        Growth::Baseline => OutbreakStatus::Flattening,
    }
}

fn emerging(thresholds: &StatusThresholds) -> OutbreakStatus {
    match thresholds.emerging_status {
        EmergingStatus::Starting => OutbreakStatus::Starting,
        EmergingStatus::Losing => OutbreakStatus::Losing,
    }
}

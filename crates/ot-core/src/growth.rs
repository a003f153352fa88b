//! Growth of a period over the chronologically preceding one.

use ot_math::percent_change;
use serde::{Deserialize, Serialize};

/// Growth of one period relative to the period before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Growth {
    /// Oldest retained period: nothing to compare against.
    Baseline,
    /// Whole-percent change; zero only when both totals are equal.
    Rate(i64),
    /// Previous total was zero and this one is positive.
    EmergingFromZero,
}

impl Growth {
    /// Growth of `current` over `previous`, or `Baseline` when there is no
    /// previous period.
    pub fn between(current: u64, previous: Option<u64>) -> Self {
        match previous {
            None => Growth::Baseline,
            Some(prev) => match percent_change(current, prev) {
                Some(rate) => Growth::Rate(rate),
                None => Growth::EmergingFromZero,
            },
        }
    }

    /// Numeric rate, if one exists.
    pub fn rate(&self) -> Option<i64> {
        match self {
            Growth::Rate(rate) => Some(*rate),
            Growth::Baseline | Growth::EmergingFromZero => None,
        }
    }

    /// Counts went up (including emerging from zero).
    pub fn is_rising(&self) -> bool {
        match self {
            Growth::Rate(rate) => *rate > 0,
            Growth::EmergingFromZero => true,
            Growth::Baseline => false,
        }
    }

    /// Key for ordering by growth: emerging sorts above every rate,
    /// baseline sorts as a flat 0%.
    pub fn sort_key(&self) -> i64 {
        match self {
            Growth::Rate(rate) => *rate,
            Growth::EmergingFromZero => i64::MAX,
            Growth::Baseline => 0,
        }
    }
}

/// Growth for each period of a most-recent-first sequence of totals.
///
/// `totals[i + 1]` is the period chronologically before `totals[i]`; the
/// last entry is the baseline.
pub fn growth_series(totals: &[u64]) -> Vec<Growth> {
    totals
        .iter()
        .enumerate()
        .map(|(i, current)| Growth::between(*current, totals.get(i + 1).copied()))
        .collect()
}

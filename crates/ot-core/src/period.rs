//! Fixed-length periods over a daily series.
//!
//! Periods are contiguous, non-overlapping windows of `period_length` days,
//! most recent first. Index 0 ends on the reference date.

use chrono::{Days, NaiveDate};
use ot_math::clamped_sum;
use serde::{Deserialize, Serialize};

use crate::growth::{growth_series, Growth};
use crate::series::DailySeries;
use crate::status::{classify, OutbreakStatus, StatusThresholds};

/// A window total before growth and status are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    /// 0 = most recent.
    pub index: usize,
    /// Days of the window that fall on or after the first observation.
    pub days: usize,
    /// Sum of the window's daily values, clamped at zero.
    pub total_count: u64,
}

/// A fully classified period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub index: usize,
    pub days: usize,
    pub total_count: u64,
    pub growth: Growth,
    pub status: OutbreakStatus,
}

impl Period {
    /// Signed whole-percent growth, if the period has one.
    pub fn growth_rate(&self) -> Option<i64> {
        self.growth.rate()
    }
}

/// Partition the trailing `period_length * period_count` days ending at
/// `reference` into windows, most recent first.
///
/// Without a reference date the series' last observation is used. Days
/// before the first observation do not count towards a window, so the
/// oldest windows may be short (or empty) when history is short. Missing
/// days inside the series read as zero.
pub fn aggregate_periods(
    series: &DailySeries,
    reference: Option<NaiveDate>,
    period_length: usize,
    period_count: usize,
) -> Vec<PeriodWindow> {
    let end = reference.or_else(|| series.last_date());
    let first = series.first_date();

    (0..period_count)
        .map(|index| {
            let bounds = end.and_then(|end| window_bounds(end, index, period_length));
            match (bounds, first) {
                (Some((start, window_end)), Some(first)) if window_end >= first => {
                    let covered_start = start.max(first);
                    let days = window_end.signed_duration_since(covered_start).num_days() + 1;
                    PeriodWindow {
                        index,
                        days: days as usize,
                        total_count: clamped_sum(&series.values_between(covered_start, window_end)),
                    }
                }
                _ => PeriodWindow {
                    index,
                    days: 0,
                    total_count: 0,
                },
            }
        })
        .collect()
}

/// First and last day of window `index`, or `None` if it falls before the
/// representable calendar.
fn window_bounds(
    end: NaiveDate,
    index: usize,
    period_length: usize,
) -> Option<(NaiveDate, NaiveDate)> {
    if period_length == 0 {
        return None;
    }
    let offset = (index as u64).checked_mul(period_length as u64)?;
    let window_end = end.checked_sub_days(Days::new(offset))?;
    let start = window_end
        .checked_sub_days(Days::new(period_length as u64 - 1))
        .unwrap_or(NaiveDate::MIN);
    Some((start, window_end))
}

/// Attach growth and status to window totals (most recent first).
pub fn classify_windows(windows: &[PeriodWindow], thresholds: &StatusThresholds) -> Vec<Period> {
    let totals: Vec<u64> = windows.iter().map(|w| w.total_count).collect();
    let growth = growth_series(&totals);

    windows
        .iter()
        .zip(growth)
        .enumerate()
        .map(|(i, (window, growth))| {
            let previous_total = totals.get(i + 1).copied().unwrap_or(0);
            Period {
                index: window.index,
                days: window.days,
                total_count: window.total_count,
                growth,
                status: classify(window.total_count, growth, previous_total, thresholds),
            }
        })
        .collect()
}

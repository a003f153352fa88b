//! Daily observation series.
//!
//! A series is keyed by calendar date. Dates are unique; gaps are allowed
//! and read as zero once the series has started.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ot_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// One day's count for one country.
///
/// `value` is signed: upstream revisions can report a negative daily delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub value: i64,
}

impl DailyObservation {
    pub fn new(date: NaiveDate, value: i64) -> Self {
        Self { date, value }
    }
}

/// How the upstream values are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// New counts per day.
    #[default]
    Daily,
    /// Running totals; converted to daily increments on load.
    Cumulative,
}

/// Date-indexed daily counts for one country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, i64>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from daily observations in any order.
    ///
    /// Fails with [`Error::DuplicateObservation`] if a date repeats.
    pub fn from_observations<I>(country: &str, observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = DailyObservation>,
    {
        let mut values = BTreeMap::new();
        for obs in observations {
            if values.insert(obs.date, obs.value).is_some() {
                return Err(Error::DuplicateObservation {
                    country: country.to_string(),
                    date: obs.date.to_string(),
                });
            }
        }
        Ok(Self { values })
    }

    /// Build from running totals.
    ///
    /// The first reported total is only the starting point: it carries
    /// everything counted before the series began, so it yields no daily
    /// value. Each later day's value is the increase over the previous
    /// reported day, and a falling running total gives a negative daily
    /// value (a revision).
    pub fn from_cumulative<I>(country: &str, observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = DailyObservation>,
    {
        let running = Self::from_observations(country, observations)?;
        let values = running
            .values
            .iter()
            .zip(running.values.iter().skip(1))
            .map(|((_, prev), (date, total))| (*date, total.saturating_sub(*prev)))
            .collect();
        Ok(Self { values })
    }

    /// Build according to `kind`.
    pub fn from_kind<I>(country: &str, kind: SeriesKind, observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = DailyObservation>,
    {
        match kind {
            SeriesKind::Daily => Self::from_observations(country, observations),
            SeriesKind::Cumulative => Self::from_cumulative(country, observations),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    /// Value on `date`; missing days read as zero.
    pub fn value_on(&self, date: NaiveDate) -> i64 {
        self.values.get(&date).copied().unwrap_or(0)
    }

    /// Reported values in `[start, end]`, oldest first. Missing days are skipped.
    pub fn values_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<i64> {
        if start > end {
            return Vec::new();
        }
        self.values.range(start..=end).map(|(_, v)| *v).collect()
    }

    /// Observations oldest first.
    pub fn observations(&self) -> impl Iterator<Item = DailyObservation> + '_ {
        self.values
            .iter()
            .map(|(date, value)| DailyObservation::new(*date, *value))
    }
}

/// Latest date reported by any series, used as the shared reference date.
pub fn latest_date<'a, I>(series: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a DailySeries>,
{
    series.into_iter().filter_map(DailySeries::last_date).max()
}

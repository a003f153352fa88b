//! Per-country build: windowing, growth and classification.

use std::cmp::Ordering;

use chrono::NaiveDate;
use ot_config::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::period::{aggregate_periods, classify_windows, Period};
use crate::series::DailySeries;
use crate::status::{OutbreakStatus, StatusThresholds};

/// A country's classified periods, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub periods: Vec<Period>,
}

impl Country {
    /// Most recent period.
    pub fn latest(&self) -> Option<&Period> {
        self.periods.first()
    }

    pub fn period(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    /// Status of the most recent period.
    pub fn current_status(&self) -> Option<OutbreakStatus> {
        self.latest().map(|p| p.status)
    }

    pub fn totals(&self) -> Vec<u64> {
        self.periods.iter().map(|p| p.total_count).collect()
    }
}

/// A named input series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSeries {
    pub name: String,
    pub series: DailySeries,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, series: DailySeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

/// Builds [`Country`] values from raw daily series.
///
/// Deterministic: the same series and settings always give the same
/// country.
#[derive(Debug, Clone)]
pub struct CountryBuilder {
    period_length: usize,
    period_count: usize,
    thresholds: StatusThresholds,
    reference_date: Option<NaiveDate>,
}

impl CountryBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        CountryBuilder {
            period_length: config.period_length,
            period_count: config.period_count,
            thresholds: StatusThresholds::from(config),
            reference_date: None,
        }
    }

    /// End every country's most recent period on `date` instead of on its
    /// own last observation.
    pub fn with_reference_date(mut self, date: Option<NaiveDate>) -> Self {
        self.reference_date = date;
        self
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    pub fn build(&self, name: &str, series: &DailySeries) -> Country {
        let windows = aggregate_periods(
            series,
            self.reference_date,
            self.period_length,
            self.period_count,
        );
        trace!(
            target: "ot_core::engine",
            country = name,
            totals = ?windows.iter().map(|w| w.total_count).collect::<Vec<_>>(),
            "windows aggregated"
        );
        let periods = classify_windows(&windows, &self.thresholds);
        let country = Country {
            name: name.to_string(),
            periods,
        };
        debug!(
            target: "ot_core::engine",
            country = name,
            status = ?country.current_status(),
            "country classified"
        );
        country
    }

    /// Build every input in order.
    pub fn build_all(&self, inputs: &[NamedSeries]) -> Vec<Country> {
        inputs
            .iter()
            .map(|input| self.build(&input.name, &input.series))
            .collect()
    }
}

/// Order by growth of period `index`, fastest growing first; ties by name.
pub fn compare_by_growth(a: &Country, b: &Country, index: usize) -> Ordering {
    let key = |c: &Country| c.period(index).map(|p| p.growth.sort_key()).unwrap_or(i64::MIN);
    key(b).cmp(&key(a)).then_with(|| a.name.cmp(&b.name))
}

/// Order alphabetically by name.
pub fn compare_by_name(a: &Country, b: &Country) -> Ordering {
    a.name.cmp(&b.name)
}

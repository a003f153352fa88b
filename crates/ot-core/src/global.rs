//! Cross-country aggregation into a world (or group) summary.
//!
//! The aggregate is reclassified from summed totals; it is not a vote over
//! the per-country statuses.

use std::collections::{BTreeMap, BTreeSet};

use ot_config::EngineConfig;
use ot_math::saturating_total;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::country::Country;
use crate::growth::Growth;
use crate::period::{classify_windows, Period, PeriodWindow};
use crate::status::{OutbreakStatus, StatusThresholds};

/// Summed periods across a set of countries, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalSummary {
    /// Number of countries summed.
    pub country_count: usize,
    pub periods: Vec<Period>,
}

impl GlobalSummary {
    pub fn latest(&self) -> Option<&Period> {
        self.periods.first()
    }

    /// Present the summary as a synthetic country.
    pub fn to_country(&self, name: impl Into<String>) -> Country {
        Country {
            name: name.into(),
            periods: self.periods.clone(),
        }
    }

    /// Whether the most recent period is not growing.
    pub fn verdict(&self) -> Verdict {
        match self.latest() {
            Some(period) if period.growth.is_rising() => Verdict::NotWinning,
            _ => Verdict::Winning,
        }
    }
}

/// Answer to "are we winning?" for the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Most recent period is flat or falling.
    Winning,
    /// Most recent period is rising.
    NotWinning,
}

impl Verdict {
    /// One-line headline for the most recent period's growth.
    pub fn headline(&self, growth: Growth, period_length: usize) -> String {
        let answer = match self {
            Verdict::Winning => "Yes",
            Verdict::NotWinning => "No",
        };
        let detail = match growth {
            Growth::Rate(rate) if rate > 0 => format!("new counts rose by {}%", rate),
            Growth::Rate(rate) => format!("new counts fell by {}%", rate.abs()),
            Growth::EmergingFromZero => "new counts appeared after a period with none".to_string(),
            Growth::Baseline => "there is no earlier period to compare against".to_string(),
        };
        format!(
            "{}, globally {} in the last {}-day period.",
            answer, detail, period_length
        )
    }
}

/// Number of countries in each status for the most recent period.
///
/// Always holds every status (zero-filled), in severity order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCounts(BTreeMap<OutbreakStatus, usize>);

impl Default for StatusCounts {
    fn default() -> Self {
        StatusCounts(OutbreakStatus::ALL.iter().map(|s| (*s, 0)).collect())
    }
}

impl StatusCounts {
    pub fn from_countries<'a, I>(countries: I) -> Self
    where
        I: IntoIterator<Item = &'a Country>,
    {
        let mut counts = StatusCounts::default();
        for status in countries.into_iter().filter_map(Country::current_status) {
            *counts.0.entry(status).or_insert(0) += 1;
        }
        counts
    }

    pub fn get(&self, status: OutbreakStatus) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutbreakStatus, usize)> + '_ {
        self.0.iter().map(|(s, n)| (*s, *n))
    }
}

/// Sums countries' periods and reclassifies the result.
#[derive(Debug, Clone)]
pub struct GlobalAggregator {
    period_count: usize,
    thresholds: StatusThresholds,
}

impl GlobalAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        GlobalAggregator {
            period_count: config.period_count,
            thresholds: StatusThresholds::from(config),
        }
    }

    /// Aggregate every country. An empty slice gives an all-zero summary.
    pub fn summarize(&self, countries: &[Country]) -> GlobalSummary {
        self.summarize_iter(countries.iter())
    }

    /// Aggregate only the named countries. Unknown names are ignored.
    pub fn summarize_subset<S: AsRef<str>>(
        &self,
        countries: &[Country],
        names: &[S],
    ) -> GlobalSummary {
        self.summarize_iter(select(countries, names).into_iter())
    }

    fn summarize_iter<'a, I>(&self, countries: I) -> GlobalSummary
    where
        I: Iterator<Item = &'a Country> + Clone,
    {
        let windows: Vec<PeriodWindow> = (0..self.period_count)
            .map(|index| {
                let at_index = countries.clone().filter_map(|c| c.period(index));
                PeriodWindow {
                    index,
                    days: at_index.clone().map(|p| p.days).max().unwrap_or(0),
                    total_count: saturating_total(at_index.map(|p| p.total_count)),
                }
            })
            .collect();

        let summary = GlobalSummary {
            country_count: countries.count(),
            periods: classify_windows(&windows, &self.thresholds),
        };
        debug!(
            target: "ot_core::engine",
            countries = summary.country_count,
            status = ?summary.latest().map(|p| p.status),
            "global summary classified"
        );
        summary
    }
}

/// Countries whose names appear in `names`, in input order.
pub fn select<'a, S: AsRef<str>>(countries: &'a [Country], names: &[S]) -> Vec<&'a Country> {
    let wanted: BTreeSet<&str> = names.iter().map(|n| n.as_ref()).collect();
    for name in &wanted {
        if !countries.iter().any(|c| c.name == *name) {
            warn!(target: "ot_core::engine", country = *name, "unknown country ignored");
        }
    }
    countries
        .iter()
        .filter(|c| wanted.contains(c.name.as_str()))
        .collect()
}

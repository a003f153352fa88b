//! Full recomputation: series → countries → global summary → counts.

use chrono::NaiveDate;
use ot_config::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::country::{Country, CountryBuilder, NamedSeries};
use crate::global::{select, GlobalAggregator, GlobalSummary, StatusCounts};
use crate::series::latest_date;

/// Everything the engine hands to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendOutput {
    /// Last day of period 0 shared by every country, if any data exists.
    pub reference_date: Option<NaiveDate>,
    pub countries: Vec<Country>,
    pub global: GlobalSummary,
    pub status_counts: StatusCounts,
}

/// Run the pipeline over `inputs`.
///
/// Every country is windowed against the same reference date (explicit, or
/// the latest observation across all inputs) so that period indices line up
/// for aggregation. With `subset`, only the named countries are kept and
/// aggregated.
pub fn run_pipeline(
    inputs: &[NamedSeries],
    config: &EngineConfig,
    reference_date: Option<NaiveDate>,
    subset: Option<&[String]>,
) -> TrendOutput {
    let reference_date = reference_date.or_else(|| latest_date(inputs.iter().map(|i| &i.series)));
    let builder = CountryBuilder::new(config).with_reference_date(reference_date);
    let mut countries = builder.build_all(inputs);

    if let Some(names) = subset {
        countries = select(&countries, names).into_iter().cloned().collect();
    }

    let global = GlobalAggregator::new(config).summarize(&countries);
    let status_counts = StatusCounts::from_countries(&countries);

    info!(
        target: "ot_core::engine",
        countries = countries.len(),
        reference_date = ?reference_date,
        "pipeline complete"
    );

    TrendOutput {
        reference_date,
        countries,
        global,
        status_counts,
    }
}

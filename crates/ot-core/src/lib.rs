//! Outbreak Trends Core Library
//!
//! Turns per-country daily series into fixed-length periods, each with a
//! growth rate and an outbreak status, and aggregates them into a global
//! summary:
//! - `series`: date-indexed daily counts
//! - `period`: windowing into most-recent-first periods
//! - `growth`: period-over-period growth
//! - `status`: status classification
//! - `country`: per-country build
//! - `global`: cross-country aggregation and status counts
//!
//! The binary entry point is in `main.rs`.

pub mod country;
pub mod exit_codes;
pub mod global;
pub mod growth;
pub mod input;
pub mod labels;
pub mod logging;
pub mod period;
pub mod pipeline;
pub mod report;
pub mod series;
pub mod status;

pub use country::{compare_by_growth, compare_by_name, Country, CountryBuilder, NamedSeries};
pub use global::{GlobalAggregator, GlobalSummary, StatusCounts, Verdict};
pub use growth::Growth;
pub use period::{aggregate_periods, classify_windows, Period, PeriodWindow};
pub use pipeline::{run_pipeline, TrendOutput};
pub use series::{DailyObservation, DailySeries, SeriesKind};
pub use status::{classify, OutbreakStatus, StatusThresholds};

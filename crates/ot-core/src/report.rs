//! Report assembly and rendering for the CLI.
//!
//! stdout carries exactly one rendered report; logs go to stderr.

use std::fmt::Write as _;

use chrono::NaiveDate;
use ot_common::{Error, OutputFormat, Result, SCHEMA_VERSION};
use ot_config::ConfigSnapshot;
use serde::Serialize;

use crate::country::Country;
use crate::global::Verdict;
use crate::labels::{cell_text, period_label, style_for};
use crate::pipeline::TrendOutput;

/// Name shown for the aggregate row.
pub const GLOBAL_ROW_NAME: &str = "World";

/// Serializable report: engine output plus the settings that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: String,
    pub period_length: usize,
    pub period_count: usize,
    /// `day/month` of the last day of each period, most recent first.
    pub period_labels: Vec<String>,
    pub verdict: Verdict,
    pub headline: String,
    #[serde(flatten)]
    pub output: TrendOutput,
    pub config: ConfigSnapshot,
}

impl Report {
    pub fn new(output: TrendOutput, config: ConfigSnapshot) -> Self {
        let period_length = config.effective.period_length;
        let period_count = config.effective.period_count;
        let period_labels = match output.reference_date {
            Some(reference) => (0..period_count)
                .map(|i| period_label(reference, i, period_length))
                .collect(),
            None => Vec::new(),
        };
        let verdict = output.global.verdict();
        let headline = match output.global.latest() {
            Some(latest) => verdict.headline(latest.growth, period_length),
            None => "No periods configured.".to_string(),
        };
        Report {
            schema_version: SCHEMA_VERSION.to_string(),
            period_length,
            period_count,
            period_labels,
            verdict,
            headline,
            output,
            config,
        }
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.output.reference_date
    }

    /// Whether the world or any country is currently rising.
    pub fn any_rising(&self) -> bool {
        let world_rising = self
            .output
            .global
            .latest()
            .map(|p| p.status.is_rising())
            .unwrap_or(false);
        world_rising
            || self
                .output
                .countries
                .iter()
                .filter_map(Country::current_status)
                .any(|s| s.is_rising())
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| Error::Internal(format!("report serialization failed: {}", e))),
            OutputFormat::Md => Ok(self.render_markdown()),
            OutputFormat::Summary => Ok(self.render_summary()),
        }
    }

    fn render_summary(&self) -> String {
        let world = match self.output.global.latest() {
            Some(p) => format!("{} ({})", p.status, cell_text(p)),
            None => "n/a".to_string(),
        };
        let counts: Vec<String> = self
            .output
            .status_counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(s, n)| format!("{}={}", s, n))
            .collect();
        format!(
            "world: {} | countries: {} | {}",
            world,
            self.output.countries.len(),
            if counts.is_empty() {
                "-".to_string()
            } else {
                counts.join(" ")
            }
        )
    }

    fn render_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Are we winning?\n");
        let _ = writeln!(out, "{}\n", self.headline);

        let world = self.output.global.to_country(GLOBAL_ROW_NAME);
        out.push_str(&self.table(std::slice::from_ref(&world)));
        out.push('\n');
        out.push_str(&self.table(&self.output.countries));

        let _ = writeln!(out, "\n| Status | Countries |");
        let _ = writeln!(out, "|---|---|");
        for (status, n) in self.output.status_counts.iter() {
            let _ = writeln!(out, "| {} | {} |", style_for(status).class, n);
        }
        out
    }

    /// Country rows with the oldest period on the left.
    fn table(&self, countries: &[Country]) -> String {
        let mut out = String::new();
        let headers: Vec<String> = (0..self.period_count)
            .rev()
            .map(|i| {
                self.period_labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("P{}", i))
            })
            .collect();
        let _ = writeln!(out, "| Country | {} |", headers.join(" | "));
        let _ = writeln!(out, "|---|{}", "---|".repeat(headers.len()));
        for country in countries {
            let cells: Vec<String> = (0..self.period_count)
                .rev()
                .map(|i| country.period(i).map(cell_text).unwrap_or_default())
                .collect();
            let _ = writeln!(
                out,
                "| {} | {} |",
                escape_cell(&country.name),
                cells.join(" | ")
            );
        }
        out
    }
}

/// Keep a `|` in free text from splitting a Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::NamedSeries;
    use crate::pipeline::run_pipeline;
    use crate::series::{DailyObservation, DailySeries};
    use chrono::Days;
    use ot_config::EngineConfig;

    fn report(values: &[i64]) -> Report {
        let start = NaiveDate::from_ymd_opt(2020, 3, 16).unwrap();
        let series = DailySeries::from_observations(
            "Italy",
            values
                .iter()
                .enumerate()
                .map(|(i, v)| DailyObservation::new(start + Days::new(i as u64), *v)),
        )
        .unwrap();
        let config = EngineConfig::default().with_period_count(2);
        let output = run_pipeline(&[NamedSeries::new("Italy", series)], &config, None, None);
        let mut snapshot = ConfigSnapshot::from_defaults().unwrap();
        snapshot.effective = config;
        Report::new(output, snapshot)
    }

    #[test]
    fn labels_and_verdict() {
        let r = report(&[4, 4, 4, 4, 4, 8, 8, 8, 8, 8]);
        assert_eq!(r.period_labels, vec!["25/3", "20/3"]);
        assert_eq!(r.verdict, Verdict::NotWinning);
        assert!(r.headline.starts_with("No, globally new counts rose by 100%"));
        assert!(r.any_rising());
    }

    #[test]
    fn json_contains_engine_output() {
        let r = report(&[4; 10]);
        let json: serde_json::Value =
            serde_json::from_str(&r.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["schema_version"], SCHEMA_VERSION);
        assert_eq!(json["countries"][0]["name"], "Italy");
        assert_eq!(json["countries"][0]["periods"][0]["status"], "flattening");
        assert_eq!(json["global"]["periods"][0]["total_count"], 20);
        assert_eq!(json["status_counts"]["flattening"], 1);
        assert_eq!(json["verdict"], "winning");
    }

    #[test]
    fn markdown_table_oldest_first() {
        let r = report(&[10, 10, 10, 10, 10, 5, 5, 5, 5, 5]);
        let md = r.render(OutputFormat::Md).unwrap();
        assert!(md.contains("| Country | 20/3 | 25/3 |"));
        assert!(md.contains("| Italy | 0% | -50% |"));
        assert!(md.contains("| World | 0% | -50% |"));
    }

    #[test]
    fn markdown_escapes_pipes_in_names() {
        let start = NaiveDate::from_ymd_opt(2020, 3, 16).unwrap();
        let series = DailySeries::from_observations(
            "Bosnia | Herzegovina",
            (0..10).map(|i| DailyObservation::new(start + Days::new(i), 3)),
        )
        .unwrap();
        let config = EngineConfig::default().with_period_count(2);
        let output = run_pipeline(
            &[NamedSeries::new("Bosnia | Herzegovina", series)],
            &config,
            None,
            None,
        );
        let mut snapshot = ConfigSnapshot::from_defaults().unwrap();
        snapshot.effective = config;
        let md = Report::new(output, snapshot).render(OutputFormat::Md).unwrap();

        assert!(md.contains("| Bosnia \\| Herzegovina | 0% | 0% |"));
        assert_eq!(escape_cell("a|b|c"), "a\\|b\\|c");
    }

    #[test]
    fn summary_line() {
        let r = report(&[10, 10, 10, 10, 10, 5, 5, 5, 5, 5]);
        let line = r.render(OutputFormat::Summary).unwrap();
        assert_eq!(line, "world: crushing (-50%) | countries: 1 | crushing=1");
    }
}

//! Input boundary: JSON documents of per-country series.
//!
//! ```json
//! { "countries": [
//!     { "name": "Italy", "kind": "cumulative",
//!       "series": [ { "date": "2020-04-01", "value": 13155 } ] }
//! ] }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use ot_common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::country::NamedSeries;
use crate::series::{DailyObservation, DailySeries, SeriesKind};

/// Raw input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDocument {
    pub countries: Vec<CountryInput>,
}

/// One country's raw series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInput {
    pub name: String,
    #[serde(default)]
    pub kind: SeriesKind,
    #[serde(default)]
    pub series: Vec<DailyObservation>,
}

/// Read and validate an input file.
pub fn load_input(path: &Path) -> Result<Vec<NamedSeries>> {
    let content = std::fs::read_to_string(path)?;
    parse_input(&content)
}

/// Parse and validate input text.
pub fn parse_input(content: &str) -> Result<Vec<NamedSeries>> {
    let document: InputDocument = serde_json::from_str(content)?;
    into_series(document)
}

/// Validate names and convert each country's observations to a daily series.
pub fn into_series(document: InputDocument) -> Result<Vec<NamedSeries>> {
    let mut seen = BTreeSet::new();
    document
        .countries
        .into_iter()
        .map(|country| {
            let name = country.name.trim().to_string();
            if name.is_empty() {
                return Err(Error::InvalidInput("country name is empty".to_string()));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::InvalidInput(format!(
                    "country {} appears more than once",
                    name
                )));
            }
            let series = DailySeries::from_kind(&name, country.kind, country.series)?;
            Ok(NamedSeries::new(name, series))
        })
        .collect()
}

/// Fail with [`Error::UnknownCountry`] if a requested name is not in the input.
pub fn ensure_known<S: AsRef<str>>(inputs: &[NamedSeries], names: &[S]) -> Result<()> {
    for name in names {
        let name = name.as_ref();
        if !inputs.iter().any(|i| i.name == name) {
            return Err(Error::UnknownCountry {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_daily_and_cumulative() {
        let inputs = parse_input(
            r#"{"countries": [
                {"name": "A", "series": [{"date": "2020-04-01", "value": 3}]},
                {"name": "B", "kind": "cumulative", "series": [
                    {"date": "2020-04-01", "value": 10},
                    {"date": "2020-04-02", "value": 12}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].name, "A");
        let b: Vec<i64> = inputs[1].series.observations().map(|o| o.value).collect();
        assert_eq!(b, vec![2]);
    }

    #[test]
    fn missing_series_is_empty() {
        let inputs = parse_input(r#"{"countries": [{"name": "Empty"}]}"#).unwrap();
        assert!(inputs[0].series.is_empty());
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = parse_input(
            r#"{"countries": [{"name": "A", "series": [{"date": "2020-04-01", "value": "ten"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn rejects_bad_dates() {
        let err = parse_input(
            r#"{"countries": [{"name": "A", "series": [{"date": "April 1", "value": 1}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let dup = parse_input(r#"{"countries": [{"name": "A"}, {"name": " A "}]}"#).unwrap_err();
        assert!(matches!(dup, Error::InvalidInput(_)));
        let empty = parse_input(r#"{"countries": [{"name": "  "}]}"#).unwrap_err();
        assert!(matches!(empty, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = parse_input(
            r#"{"countries": [{"name": "A", "series": [
                {"date": "2020-04-01", "value": 1},
                {"date": "2020-04-01", "value": 2}
            ]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), 22);
    }

    #[test]
    fn ensure_known_names() {
        let inputs = parse_input(r#"{"countries": [{"name": "A"}]}"#).unwrap();
        assert!(ensure_known(&inputs, &["A"]).is_ok());
        let err = ensure_known(&inputs, &["A", "Z"]).unwrap_err();
        assert!(matches!(err, Error::UnknownCountry { ref name } if name == "Z"));
    }
}

//! End-to-end CLI tests for ot-core.
//!
//! Each test runs the binary against a temp input file with config
//! discovery pointed at an empty directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for the ot-core binary, isolated from user config.
fn ot_core(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ot-core").expect("ot-core binary should exist");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("OUTBREAK_TRENDS_CONFIG")
        .env_remove("OUTBREAK_TRENDS_CONFIG_DIR")
        .env_remove("OT_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Ten days of data: 2/day then `recent`/day, ending 2020-04-10.
fn country(name: &str, recent: i64) -> Value {
    let series: Vec<Value> = (1..=10)
        .map(|day| {
            let value = if day <= 5 { 2 } else { recent };
            serde_json::json!({ "date": format!("2020-04-{:02}", day), "value": value })
        })
        .collect();
    serde_json::json!({ "name": name, "series": series })
}

fn write_input(dir: &TempDir, countries: Vec<Value>) -> PathBuf {
    let path = dir.path().join("input.json");
    let doc = serde_json::json!({ "countries": countries });
    std::fs::write(&path, doc.to_string()).expect("write input");
    path
}

fn classify_json(dir: &TempDir, input: &Path, extra: &[&str]) -> Value {
    let output = ot_core(dir.path())
        .args(["classify", "--input"])
        .arg(input)
        .args(["--period-count", "2"])
        .args(extra)
        .output()
        .expect("run ot-core");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ============================================================================
// classify
// ============================================================================

mod classify {
    use super::*;

    #[test]
    fn json_report_has_countries_global_and_counts() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("Italy", 1), country("Spain", 4)]);
        let report = classify_json(&dir, &input, &[]);

        assert_eq!(report["schema_version"], "1.0.0");
        assert_eq!(report["reference_date"], "2020-04-10");
        assert_eq!(report["period_labels"], serde_json::json!(["10/4", "5/4"]));
        assert_eq!(report["countries"].as_array().unwrap().len(), 2);
        assert_eq!(report["countries"][0]["name"], "Italy");
        assert_eq!(report["countries"][0]["periods"][0]["status"], "winning");
        assert_eq!(report["countries"][1]["periods"][0]["status"], "losing");
        assert_eq!(report["global"]["periods"][0]["total_count"], 25);
        assert_eq!(report["status_counts"]["losing"], 1);
        assert_eq!(report["status_counts"]["won"], 0);
        assert_eq!(report["verdict"], "not_winning");
        assert_eq!(report["config"]["config_source"], "builtin_default");
    }

    #[test]
    fn growth_sort_puts_fastest_first() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1), country("B", 4)]);
        let report = classify_json(&dir, &input, &["--sort", "growth"]);

        assert_eq!(report["countries"][0]["name"], "B");
        assert_eq!(report["countries"][1]["name"], "A");
    }

    #[test]
    fn countries_subset_filters_aggregate() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1), country("B", 4)]);
        let report = classify_json(&dir, &input, &["--countries", "A"]);

        assert_eq!(report["countries"].as_array().unwrap().len(), 1);
        assert_eq!(report["global"]["country_count"], 1);
        assert_eq!(report["global"]["periods"][0]["total_count"], 5);
    }

    #[test]
    fn reference_date_override() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        let report = classify_json(&dir, &input, &["--reference-date", "2020-04-05"]);

        assert_eq!(report["reference_date"], "2020-04-05");
        assert_eq!(report["countries"][0]["periods"][0]["total_count"], 10);
        assert_eq!(report["countries"][0]["periods"][0]["status"], "starting");
    }

    #[test]
    fn summary_format_is_one_line() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        ot_core(dir.path())
            .args(["-f", "summary", "classify", "--period-count", "2", "--input"])
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("world: winning (-50%) | countries: 1"));
    }

    #[test]
    fn markdown_format_has_tables() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        ot_core(dir.path())
            .args(["-f", "md", "classify", "--period-count", "2", "--input"])
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("# Are we winning?"))
            .stdout(predicate::str::contains("| Country | 5/4 | 10/4 |"))
            .stdout(predicate::str::contains("| A | 0% | -50% |"));
    }

    #[test]
    fn fail_on_losing_exits_one() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 4)]);
        ot_core(dir.path())
            .args(["classify", "--period-count", "2", "--fail-on-losing", "--input"])
            .arg(&input)
            .assert()
            .code(1);
    }

    #[test]
    fn fail_on_losing_passes_when_falling() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        ot_core(dir.path())
            .args(["classify", "--period-count", "2", "--fail-on-losing", "--input"])
            .arg(&input)
            .assert()
            .code(0);
    }
}

// ============================================================================
// Errors and exit codes
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn missing_input_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        ot_core(dir.path())
            .args(["classify", "--input"])
            .arg(dir.path().join("absent.json"))
            .assert()
            .code(21)
            .stderr(predicate::str::contains("\"code\":60"));
    }

    #[test]
    fn malformed_json_is_input_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "{ not json").unwrap();
        ot_core(dir.path())
            .args(["classify", "--input"])
            .arg(&path)
            .assert()
            .code(12);
    }

    #[test]
    fn duplicate_date_is_input_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(
            &path,
            r#"{"countries":[{"name":"A","series":[
                {"date":"2020-04-01","value":1},{"date":"2020-04-01","value":2}]}]}"#,
        )
        .unwrap();
        ot_core(dir.path())
            .args(["classify", "--input"])
            .arg(&path)
            .assert()
            .code(12)
            .stderr(predicate::str::contains("\"date\":\"2020-04-01\""));
    }

    #[test]
    fn unknown_country_is_input_error() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        ot_core(dir.path())
            .args(["-f", "summary", "classify", "--countries", "Atlantis", "--input"])
            .arg(&input)
            .assert()
            .code(12)
            .stderr(predicate::str::contains("Unknown Country"));
    }

    #[test]
    fn bad_reference_date_is_config_error() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        ot_core(dir.path())
            .args(["classify", "--reference-date", "10/04/2020", "--input"])
            .arg(&input)
            .assert()
            .code(11);
    }

    #[test]
    fn zero_period_length_is_config_error() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);
        ot_core(dir.path())
            .args(["classify", "--period-length", "0", "--input"])
            .arg(&input)
            .assert()
            .code(11);
    }

    #[test]
    fn unknown_subcommand_is_args_error() {
        let dir = TempDir::new().unwrap();
        ot_core(dir.path())
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn help_exits_clean() {
        let dir = TempDir::new().unwrap();
        ot_core(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("classify"));
    }
}

// ============================================================================
// config
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn show_defaults() {
        let dir = TempDir::new().unwrap();
        let output = ot_core(dir.path())
            .args(["config", "show"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["config"]["effective"]["period_length"], 5);
        assert_eq!(json["config"]["effective"]["period_count"], 6);
        assert_eq!(json["config"]["config_source"], "builtin_default");
    }

    #[test]
    fn config_file_changes_classification() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("engine.toml");
        std::fs::write(&config, "period_length = 10\nperiod_count = 1\n").unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);

        let output = ot_core(dir.path())
            .args(["classify", "--input"])
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .output()
            .unwrap();
        assert!(output.status.success());
        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["period_length"], 10);
        assert_eq!(report["countries"][0]["periods"][0]["total_count"], 15);
        assert_eq!(report["config"]["config_source"], "cli_argument");
    }

    #[test]
    fn cli_override_repairs_invalid_file_value() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("engine.toml");
        std::fs::write(&config, "period_count = 0\n").unwrap();
        let input = write_input(&dir, vec![country("A", 1)]);

        ot_core(dir.path())
            .args(["classify", "--input"])
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .assert()
            .code(11);

        let output = ot_core(dir.path())
            .args(["classify", "--period-count", "3", "--input"])
            .arg(&input)
            .arg("--config")
            .arg(&config)
            .output()
            .unwrap();
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["period_count"], 3);
    }

    #[test]
    fn validate_rejects_bad_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("engine.toml");
        std::fs::write(&config, "period_count = 0\n").unwrap();
        ot_core(dir.path())
            .args(["config", "validate"])
            .arg(&config)
            .assert()
            .code(11);
    }

    #[test]
    fn validate_accepts_good_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("engine.json");
        std::fs::write(&config, r#"{"winning_floor": 25}"#).unwrap();
        ot_core(dir.path())
            .args(["config", "validate"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"valid\": true"));
    }
}

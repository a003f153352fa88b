//! Where the log filter and format come from.
//!
//! `-v`/`-q` win over `OT_LOG`, which wins over `RUST_LOG`; with none of
//! them only warnings are shown. `--log-format` wins over `OT_LOG_FORMAT`.

use clap::ValueEnum;

/// Shape of the lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per event.
    #[value(alias = "json")]
    Jsonl,
}

/// Verbosity picked on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Level for `-v` repeated `count` times.
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

const DEFAULT_FILTER: &str = "warn";

/// Resolved logging setup handed to [`super::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `info` or `ot_core::engine=trace`.
    pub filter: String,
}

impl LogConfig {
    /// Resolve from CLI flags and the process environment.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::resolve(cli_level, cli_format, |key| std::env::var(key).ok())
    }

    fn resolve<F>(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = match cli_level {
            Some(level) => level.directive().to_string(),
            None => ["OT_LOG", "RUST_LOG"]
                .iter()
                .filter_map(|key| env(key))
                .find(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
        };
        let format = cli_format
            .or_else(|| {
                env("OT_LOG_FORMAT").and_then(|value| LogFormat::from_str(&value, true).ok())
            })
            .unwrap_or_default();
        LogConfig { format, filter }
    }
}

//! Error types for Outbreak Trends.
//!
//! Errors only arise at the boundaries: loading configuration and
//! reading input series. The classification engine itself is total and
//! never fails.
//!
//! Errors serialize to structured JSON for machine consumers:
//! ```json
//! {
//!   "code": 22,
//!   "category": "input",
//!   "message": "duplicate observation for Italy on 2020-04-02",
//!   "context": { "country": "Italy", "date": "2020-04-02" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Outbreak Trends operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Engine configuration errors.
    Config,
    /// Input series errors rejected at the boundary.
    Input,
    /// File I/O and serialization errors.
    Io,
    /// Failures in our own code, not caused by the user's files.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Unified error type for Outbreak Trends.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid reference date: {0}")]
    InvalidReferenceDate(String),

    // Input errors (20-29)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown country: {name}")]
    UnknownCountry { name: String },

    #[error("duplicate observation for {country} on {date}")]
    DuplicateObservation { country: String, date: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors (90-99)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 60-69: I/O errors
    /// - 90-99: Internal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidReferenceDate(_) => 11,
            Error::InvalidInput(_) => 20,
            Error::UnknownCountry { .. } => 21,
            Error::DuplicateObservation { .. } => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::Internal(_) => 90,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidReferenceDate(_) => ErrorCategory::Config,
            Error::InvalidInput(_)
            | Error::UnknownCountry { .. }
            | Error::DuplicateObservation { .. } => ErrorCategory::Input,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
            Error::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidReferenceDate(_) => "Invalid Reference Date",
            Error::InvalidInput(_) => "Invalid Input",
            Error::UnknownCountry { .. } => "Unknown Country",
            Error::DuplicateObservation { .. } => "Duplicate Observation",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
            Error::Internal(_) => "Internal Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'ot-core config validate' to check the engine configuration file."
            }
            Error::InvalidReferenceDate(_) => "Pass the reference date as YYYY-MM-DD.",
            Error::InvalidInput(_) => {
                "Check that every country has a non-empty, unique name in the input file."
            }
            Error::UnknownCountry { .. } => "Check the country name against the input file.",
            Error::DuplicateObservation { .. } => {
                "Each country may report at most one observation per date."
            }
            Error::Io(_) => "Check that the file exists and is readable.",
            Error::Json(_) => "Invalid JSON in file. Check syntax with 'jq . <file>'.",
            Error::Internal(_) => "This is a bug in ot-core; please report it with the input file.",
        }
    }

    /// Format the error for human-facing output (headline, reason, fix).
    pub fn to_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., country, date).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::UnknownCountry { name } => {
                context.insert("country".to_string(), serde_json::json!(name));
            }
            Error::DuplicateObservation { country, date } => {
                context.insert("country".to_string(), serde_json::json!(country));
                context.insert("date".to_string(), serde_json::json!(date));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

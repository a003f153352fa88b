//! Outbreak Trends common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - Common error type with stable codes
//! - Output format selection
//! - Report schema versioning

pub mod error;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;

/// Schema version of the JSON report emitted by `ot-core`.
pub const SCHEMA_VERSION: &str = "1.0.0";

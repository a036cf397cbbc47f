//! Error types for the tollkit transformations.
//!
//! - [`CsvError`] - loading and typed column access (defined in [`crate::parser`])
//! - [`TransformError`] - failures inside a single transformation
//! - [`ConfigError`] - settings file and environment errors
//! - [`PipelineError`] - top-level errors returned by file-level entry points
//!
//! Conversion is automatic via `From`, so `?` works across boundaries.

use thiserror::Error;

pub use crate::parser::CsvError;

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised by a transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input table could not be read as the transformation expects.
    #[error("{0}")]
    Csv(#[from] CsvError),

    /// The same (row-id, col-id) pair appears more than once.
    #[error("Duplicate pair ({row}, {col}) at line {line}")]
    DuplicatePair { row: i64, col: i64, line: usize },

    /// Shortest paths are undefined over negative weights.
    #[error("Negative distance {distance} on edge {start} -> {end}")]
    NegativeDistance { start: i64, end: i64, distance: f64 },

    /// The reference id has no rows in the long-form table.
    #[error("Reference id {0} not found in id_start")]
    UnknownReference(i64),

    /// The reference id exists but every distance is missing.
    #[error("Reference id {0} has no defined distances")]
    NoDistances(i64),

    /// An interval record could not be placed on the weekly timeline.
    #[error("Invalid interval at line {line}: {message}")]
    InvalidInterval { line: usize, message: String },
}

impl TransformError {
    pub fn invalid_interval(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidInterval {
            line,
            message: message.into(),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading [`crate::config::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for the expected shape.
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline`] and the CLI.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Writing CSV output failed.
    #[error("CSV output error: {0}")]
    CsvWrite(#[from] csv::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input (e.g. the interactive reference id prompt).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

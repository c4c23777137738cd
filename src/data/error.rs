//! Data layer error types.

use thiserror::Error;

/// Errors raised while turning a file into a [`LaunchDataset`](super::model::LaunchDataset).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The `class` column holds something other than 0 or 1.
    #[error("outcome class must be 0 or 1, got {0}")]
    InvalidOutcome(f64),

    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: column '{column}' is null")]
    NullValue { column: &'static str, row: usize },
}

/// Errors raised by query parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("payload bound must be a non-negative number, got {0}")]
    InvalidBound(f64),

    #[error("payload range is inverted: lower {lower} > upper {upper}")]
    InvertedRange { lower: f64, upper: f64 },
}

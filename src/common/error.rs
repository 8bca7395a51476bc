//! Error Types.
//!
//! Two layers of failure exist. `InvalidConfigError` rejects a single
//! chiplet configuration and is always recoverable: a batch records it and
//! moves on to the next entry. `Error` covers everything that prevents the
//! estimator from running at all, such as an unreadable batch file or a
//! malformed calibration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for estimator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a raw chiplet configuration is rejected by the validator.
///
/// Every variant names the offending field so that a rejected batch entry
/// can be reported precisely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfigError {
    /// A required field was absent (or `null`) and had no default.
    #[error("missing required field `{field}`")]
    Missing {
        /// Field name.
        field: &'static str,
    },

    /// The field could not be read as a finite number.
    #[error("field `{field}` is not numeric: {value:?}")]
    NotNumeric {
        /// Field name.
        field: &'static str,
        /// Raw text as supplied.
        value: String,
    },

    /// The field parsed but is zero or negative.
    #[error("field `{field}` must be strictly positive, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Parsed value.
        value: f64,
    },

    /// The field parsed but is negative where zero is the lower bound.
    #[error("field `{field}` must not be negative, got {value}")]
    Negative {
        /// Field name.
        field: &'static str,
        /// Parsed value.
        value: f64,
    },

    /// A die or core count with a fractional part.
    #[error("field `{field}` must be an integer, got {value}")]
    NotIntegral {
        /// Field name.
        field: &'static str,
        /// Parsed value.
        value: f64,
    },

    /// A die or core count too large to represent.
    #[error("field `{field}` is out of range: {value}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Parsed value.
        value: f64,
    },

    /// A batch entry that is not a JSON object.
    #[error("configuration entry is not an object: {found}")]
    NotAnObject {
        /// JSON text of the entry.
        found: String,
    },
}

impl InvalidConfigError {
    /// Returns the name of the field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::NotNumeric { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. }
            | Self::NotIntegral { field, .. }
            | Self::OutOfRange { field, .. } => Some(field),
            Self::NotAnObject { .. } => None,
        }
    }
}

/// Errors that stop an estimator invocation as a whole.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Batch input is not valid JSON.
    #[error("failed to parse batch JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Calibration input is not valid TOML or has mistyped fields.
    #[error("failed to parse model configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Batch input parsed, but the top level is not an array.
    #[error("batch input must be a JSON array of configurations, found {found}")]
    NotAnArray {
        /// Kind of the JSON value found instead.
        found: &'static str,
    },

    /// A calibration constant is outside its admissible range.
    #[error("invalid calibration `{key}`: {reason}")]
    Calibration {
        /// Dotted TOML key, e.g. `cpu.flops_per_core`.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// A single configuration was rejected.
    #[error(transparent)]
    InvalidConfig(#[from] InvalidConfigError),
}

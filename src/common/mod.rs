//! Common utilities and types used throughout the estimator.
//!
//! This module provides the error types shared by the validator, the
//! calibration loader and the batch loader, together with the unit
//! conversion constants the closed-form model is written in.

/// Error types for configuration, calibration and batch loading.
pub mod error;

/// Unit conversion constants and helpers.
pub mod units;

pub use error::{Error, InvalidConfigError, Result};

//! Evaluation harness around the estimator.

/// JSON batch loading and per-entry evaluation.
pub mod batch;

pub use batch::{
    entry_defaults, load_batch, parse_batch, run_batch, BatchEntry, BatchReport, RawEntry,
};

//! Chiplet Architecture Estimator Library.
//!
//! This crate implements a coarse-grained analytic estimator for chiplet
//! packages that combine CPU dies and NPU dies behind a shared die-to-die
//! interconnect and shared memory bandwidth. It is a design-space exploration
//! calculator built from explicit closed-form formulas, not a cycle-level
//! simulator.
//!
//! # Architecture
//!
//! * **Validator**: raw numbers or numeric strings become a `ChipletConfig`
//!   in one parse-and-validate step.
//! * **Estimator**: compute time, interconnect/coherence/sync/memory
//!   overheads, OS task capacity, total latency and power.
//! * **Harness**: JSON batch evaluation and table/JSON reporting.
//!
//! # Modules
//!
//! * `chiplet`: Validated input type and the validator.
//! * `common`: Error types and unit constants.
//! * `config`: Model calibration loaded from TOML.
//! * `model`: The estimator itself.
//! * `report`: Table, JSON and breakdown rendering.
//! * `sim`: Batch loading and evaluation.

/// Chiplet package and workload description, plus its validator.
///
/// `ChipletConfig` can only be built through validation, so the model never
/// has to guard its own divisions.
pub mod chiplet;

/// Shared error types and unit conversion constants.
pub mod common;

/// Calibration constants of the model.
///
/// Loads and validates TOML calibration files; every section and field is
/// optional and defaults to `configs/default.toml`.
pub mod config;

/// Closed-form latency and power model.
pub mod model;

/// Rendering of results as grid tables, JSON and breakdowns.
pub mod report;

/// Batch evaluation of many configurations.
pub mod sim;

pub use chiplet::{ChipletConfig, RawConfig, RawValue};
pub use common::{Error, InvalidConfigError, Result};
pub use config::{ModelConfig, WorkloadDefaults};
pub use model::{estimate, Estimator, SimulationResult};

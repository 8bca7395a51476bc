//! Batch Loader and Evaluator.
//!
//! A batch file is a JSON array of configuration objects. The whole array is
//! parsed in memory; each entry is then layered over the caller's defaults,
//! validated and estimated on its own. A bad entry is recorded and skipped,
//! never aborting its siblings.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::chiplet::{ChipletConfig, RawConfig};
use crate::common::{Error, InvalidConfigError, Result};
use crate::model::{Estimator, SimulationResult};

/// A parsed batch entry, or the reason it could not be read as an object.
pub type RawEntry = std::result::Result<RawConfig, InvalidConfigError>;

/// Outcome of one batch entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Zero-based position in the input array.
    pub index: usize,
    pub outcome: std::result::Result<SimulationResult, InvalidConfigError>,
}

/// Outcomes of a whole batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Results of the valid entries, in input order.
    pub fn results(&self) -> impl Iterator<Item = &SimulationResult> + '_ {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    /// Rejected entries with their index and error.
    pub fn rejected(&self) -> impl Iterator<Item = (usize, &InvalidConfigError)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.index, err)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.results().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }
}

/// Parses batch text into raw entries.
///
/// # Returns
///
/// One element per array entry. Entries that are not objects are already
/// rejected here but still occupy their slot so indices stay aligned.
pub fn parse_batch(text: &str) -> Result<Vec<RawEntry>> {
    let value: Value = serde_json::from_str(text)?;
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(Error::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    Ok(entries.iter().map(RawConfig::from_json).collect())
}

/// Reads and parses a batch file.
pub fn load_batch(path: &Path) -> Result<Vec<RawEntry>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_batch(&text)?;
    log::info!("loaded {} batch entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Builds the defaults layered under every batch entry.
///
/// Workload values from `overrides` (command-line flags) take precedence over
/// `workload` (the calibration's `[workload]` section). Hardware values in
/// `overrides` are dropped with a warning: each entry names its own package.
pub fn entry_defaults(overrides: &RawConfig, workload: &RawConfig) -> RawConfig {
    let kept = overrides.workload_only();
    if &kept != overrides {
        log::warn!("hardware flags are ignored in batch mode");
    }
    kept.or(workload)
}

/// Validates and estimates every entry.
///
/// # Arguments
///
/// * `entries` - Raw entries as returned by `parse_batch`.
/// * `defaults` - Values for fields an entry leaves out.
/// * `estimator` - Calibrated estimator.
pub fn run_batch(
    entries: &[RawEntry],
    defaults: &RawConfig,
    estimator: &Estimator,
) -> BatchReport {
    let entries = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let outcome = entry
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|raw| ChipletConfig::try_from(raw.or(defaults)))
                .map(|config| estimator.estimate(&config));

            if let Err(err) = &outcome {
                log::warn!("skipping batch entry #{}: {}", index, err);
            }
            BatchEntry { index, outcome }
        })
        .collect();

    BatchReport { entries }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

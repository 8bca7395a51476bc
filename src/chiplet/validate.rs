//! Configuration Validator.
//!
//! Raw parameter values arrive from command-line flags (always text) or from
//! JSON batch entries (numbers, numeric strings, or anything else a user
//! typed). This module turns them into a `ChipletConfig` in one explicit
//! parse-and-validate step. Rejection is total: the first bad field rejects
//! the whole configuration, and nothing is ever clamped into range.

use serde_json::Value;

use super::ChipletConfig;
use crate::common::InvalidConfigError;
use crate::config::WorkloadDefaults;

pub const CPU_DIES: &str = "cpu_dies";
pub const CPU_CORES_PER_DIE: &str = "cpu_cores_per_die";
pub const NPU_DIES: &str = "npu_dies";
pub const NPU_CORES_PER_DIE: &str = "npu_cores_per_die";
pub const INTERCONNECT_BW: &str = "interconnect_bw";
pub const MEMORY_BW: &str = "memory_bw";
pub const CPU_FLOPS: &str = "cpu_flops";
pub const NPU_FLOPS: &str = "npu_flops";
pub const INFERENCE_FREQ: &str = "inference_freq";
pub const LINUX_DMIPS: &str = "linux_dmips";
pub const DATA_SIZE: &str = "data_size";

/// All recognised field names, in validation order.
pub const FIELDS: [&str; 11] = [
    CPU_DIES,
    CPU_CORES_PER_DIE,
    NPU_DIES,
    NPU_CORES_PER_DIE,
    INTERCONNECT_BW,
    MEMORY_BW,
    CPU_FLOPS,
    NPU_FLOPS,
    INFERENCE_FREQ,
    LINUX_DMIPS,
    DATA_SIZE,
];

/// A parameter value before numeric validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Already numeric (JSON number or programmatic input).
    Number(f64),
    /// Text such as `"6"`, `"0.01"` or `"2e13"`.
    Text(String),
}

impl RawValue {
    /// Converts a JSON value. `null` means "not given".
    ///
    /// Booleans, arrays and objects are kept as their JSON text so that the
    /// validator reports them as non-numeric instead of silently dropping
    /// them.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => match n.as_f64() {
                Some(f) => Some(Self::Number(f)),
                None => Some(Self::Text(n.to_string())),
            },
            Value::String(s) => Some(Self::Text(s.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }

    /// Reads the value as a finite real number.
    ///
    /// # Arguments
    ///
    /// * `field` - Field name used in the error.
    ///
    /// # Returns
    ///
    /// The number, or `NotNumeric` for unparsable text, NaN or infinities.
    pub fn parse(&self, field: &'static str) -> Result<f64, InvalidConfigError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| InvalidConfigError::NotNumeric {
                    field,
                    value: s.clone(),
                })?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(InvalidConfigError::NotNumeric {
                field,
                value: self.to_string(),
            })
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Unvalidated configuration. `None` marks a field that was not supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    pub cpu_dies: Option<RawValue>,
    pub cpu_cores_per_die: Option<RawValue>,
    pub npu_dies: Option<RawValue>,
    pub npu_cores_per_die: Option<RawValue>,
    pub interconnect_bw: Option<RawValue>,
    pub memory_bw: Option<RawValue>,
    pub cpu_flops: Option<RawValue>,
    pub npu_flops: Option<RawValue>,
    pub inference_freq: Option<RawValue>,
    pub linux_dmips: Option<RawValue>,
    pub data_size: Option<RawValue>,
}

impl RawConfig {
    /// Builds a raw configuration from one JSON batch entry.
    ///
    /// Unknown keys are ignored. A non-object entry is rejected.
    pub fn from_json(entry: &Value) -> Result<Self, InvalidConfigError> {
        let object = entry
            .as_object()
            .ok_or_else(|| InvalidConfigError::NotAnObject {
                found: entry.to_string(),
            })?;

        let mut raw = Self::default();
        for (key, value) in object {
            match raw.slot_mut(key) {
                Some(slot) => *slot = RawValue::from_json(value),
                None => log::debug!("ignoring unknown configuration key `{}`", key),
            }
        }
        Ok(raw)
    }

    /// Sets a field by name. Returns `false` if the name is not recognised.
    pub fn set(&mut self, field: &str, value: impl Into<RawValue>) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Returns the raw value of a field by name.
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        match field {
            CPU_DIES => self.cpu_dies.as_ref(),
            CPU_CORES_PER_DIE => self.cpu_cores_per_die.as_ref(),
            NPU_DIES => self.npu_dies.as_ref(),
            NPU_CORES_PER_DIE => self.npu_cores_per_die.as_ref(),
            INTERCONNECT_BW => self.interconnect_bw.as_ref(),
            MEMORY_BW => self.memory_bw.as_ref(),
            CPU_FLOPS => self.cpu_flops.as_ref(),
            NPU_FLOPS => self.npu_flops.as_ref(),
            INFERENCE_FREQ => self.inference_freq.as_ref(),
            LINUX_DMIPS => self.linux_dmips.as_ref(),
            DATA_SIZE => self.data_size.as_ref(),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<RawValue>> {
        match field {
            CPU_DIES => Some(&mut self.cpu_dies),
            CPU_CORES_PER_DIE => Some(&mut self.cpu_cores_per_die),
            NPU_DIES => Some(&mut self.npu_dies),
            NPU_CORES_PER_DIE => Some(&mut self.npu_cores_per_die),
            INTERCONNECT_BW => Some(&mut self.interconnect_bw),
            MEMORY_BW => Some(&mut self.memory_bw),
            CPU_FLOPS => Some(&mut self.cpu_flops),
            NPU_FLOPS => Some(&mut self.npu_flops),
            INFERENCE_FREQ => Some(&mut self.inference_freq),
            LINUX_DMIPS => Some(&mut self.linux_dmips),
            DATA_SIZE => Some(&mut self.data_size),
            _ => None,
        }
    }

    /// Layers `self` over `fallback`: fields missing here are taken from
    /// `fallback`.
    pub fn or(&self, fallback: &RawConfig) -> RawConfig {
        let mut merged = self.clone();
        for field in FIELDS {
            if merged.get(field).is_none() {
                if let Some(value) = fallback.get(field) {
                    merged.set(field, value.clone());
                }
            }
        }
        merged
    }

    /// Drops the hardware fields, keeping only the workload description.
    pub fn workload_only(&self) -> RawConfig {
        RawConfig {
            cpu_flops: self.cpu_flops.clone(),
            npu_flops: self.npu_flops.clone(),
            inference_freq: self.inference_freq.clone(),
            linux_dmips: self.linux_dmips.clone(),
            data_size: self.data_size.clone(),
            ..RawConfig::default()
        }
    }

    /// Parses every field and checks the configuration invariants.
    ///
    /// Fields are checked in declaration order, so the reported error is the
    /// first offending field.
    pub fn validate(&self) -> Result<ChipletConfig, InvalidConfigError> {
        Ok(ChipletConfig {
            cpu_dies: count(CPU_DIES, &self.cpu_dies)?,
            cpu_cores_per_die: count(CPU_CORES_PER_DIE, &self.cpu_cores_per_die)?,
            npu_dies: count(NPU_DIES, &self.npu_dies)?,
            npu_cores_per_die: count(NPU_CORES_PER_DIE, &self.npu_cores_per_die)?,
            interconnect_bw: positive(INTERCONNECT_BW, &self.interconnect_bw)?,
            memory_bw: positive(MEMORY_BW, &self.memory_bw)?,
            cpu_flops: positive(CPU_FLOPS, &self.cpu_flops)?,
            npu_flops: positive(NPU_FLOPS, &self.npu_flops)?,
            inference_freq: positive(INFERENCE_FREQ, &self.inference_freq)?,
            linux_dmips: positive(LINUX_DMIPS, &self.linux_dmips)?,
            data_size: non_negative(DATA_SIZE, &self.data_size)?,
        })
    }
}

impl From<&WorkloadDefaults> for RawConfig {
    fn from(defaults: &WorkloadDefaults) -> Self {
        RawConfig {
            cpu_flops: Some(defaults.cpu_flops.into()),
            npu_flops: Some(defaults.npu_flops.into()),
            inference_freq: Some(defaults.inference_freq.into()),
            linux_dmips: Some(defaults.linux_dmips.into()),
            data_size: Some(defaults.data_size.into()),
            ..RawConfig::default()
        }
    }
}

impl TryFrom<&RawConfig> for ChipletConfig {
    type Error = InvalidConfigError;

    fn try_from(raw: &RawConfig) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

impl TryFrom<RawConfig> for ChipletConfig {
    type Error = InvalidConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

fn required<'a>(
    field: &'static str,
    value: &'a Option<RawValue>,
) -> Result<&'a RawValue, InvalidConfigError> {
    value.as_ref().ok_or(InvalidConfigError::Missing { field })
}

fn positive(field: &'static str, value: &Option<RawValue>) -> Result<f64, InvalidConfigError> {
    let v = required(field, value)?.parse(field)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(InvalidConfigError::NotPositive { field, value: v })
    }
}

fn non_negative(
    field: &'static str,
    value: &Option<RawValue>,
) -> Result<f64, InvalidConfigError> {
    let v = required(field, value)?.parse(field)?;
    if v >= 0.0 {
        // normalise -0.0
        Ok(v + 0.0)
    } else {
        Err(InvalidConfigError::Negative { field, value: v })
    }
}

fn count(field: &'static str, value: &Option<RawValue>) -> Result<u32, InvalidConfigError> {
    let v = positive(field, value)?;
    if v.fract() != 0.0 {
        return Err(InvalidConfigError::NotIntegral { field, value: v });
    }
    if v > f64::from(u32::MAX) {
        return Err(InvalidConfigError::OutOfRange { field, value: v });
    }
    Ok(v as u32)
}

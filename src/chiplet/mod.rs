//! Chiplet package and workload description.
//!
//! `ChipletConfig` is the only input the estimator accepts. It can only be
//! produced by the validator in [`validate`], so every value reaching the
//! model already satisfies the positivity and integrality invariants.

use serde::Serialize;

/// Parse-and-validate step from raw values to `ChipletConfig`.
pub mod validate;

pub use validate::{RawConfig, RawValue};

/// Validated hardware and workload parameters for one estimate.
///
/// Counts are at least 1; bandwidths, FLOPs, rate and DMIPS are finite and
/// strictly positive; `data_size` is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChipletConfig {
    pub(crate) cpu_dies: u32,
    pub(crate) cpu_cores_per_die: u32,
    pub(crate) npu_dies: u32,
    pub(crate) npu_cores_per_die: u32,
    pub(crate) interconnect_bw: f64,
    pub(crate) memory_bw: f64,
    pub(crate) cpu_flops: f64,
    pub(crate) npu_flops: f64,
    pub(crate) inference_freq: f64,
    pub(crate) linux_dmips: f64,
    pub(crate) data_size: f64,
}

impl ChipletConfig {
    /// Number of CPU dies.
    pub fn cpu_dies(&self) -> u32 {
        self.cpu_dies
    }

    /// CPU cores on each CPU die.
    pub fn cpu_cores_per_die(&self) -> u32 {
        self.cpu_cores_per_die
    }

    /// Number of NPU dies.
    pub fn npu_dies(&self) -> u32 {
        self.npu_dies
    }

    /// NPU cores on each NPU die.
    pub fn npu_cores_per_die(&self) -> u32 {
        self.npu_cores_per_die
    }

    /// Die-to-die fabric bandwidth in GB/s.
    pub fn interconnect_bw(&self) -> f64 {
        self.interconnect_bw
    }

    /// Shared memory bandwidth in GB/s.
    pub fn memory_bw(&self) -> f64 {
        self.memory_bw
    }

    /// FLOPs one inference needs on the CPU engine.
    pub fn cpu_flops(&self) -> f64 {
        self.cpu_flops
    }

    /// FLOPs one inference needs on the NPU engine.
    pub fn npu_flops(&self) -> f64 {
        self.npu_flops
    }

    /// Requested inferences per second.
    pub fn inference_freq(&self) -> f64 {
        self.inference_freq
    }

    /// DMIPS demanded by the concurrent legacy OS task.
    pub fn linux_dmips(&self) -> f64 {
        self.linux_dmips
    }

    /// GB moved across the interconnect per inference.
    pub fn data_size(&self) -> f64 {
        self.data_size
    }

    /// Total die count of the package.
    pub fn total_dies(&self) -> u64 {
        u64::from(self.cpu_dies) + u64::from(self.npu_dies)
    }

    /// CPU cores across all CPU dies.
    pub fn total_cpu_cores(&self) -> u64 {
        u64::from(self.cpu_dies) * u64::from(self.cpu_cores_per_die)
    }

    /// NPU cores across all NPU dies.
    pub fn total_npu_cores(&self) -> u64 {
        u64::from(self.npu_dies) * u64::from(self.npu_cores_per_die)
    }

    /// Every core that takes part in an inference.
    ///
    /// Widened past `u64`: both per-engine products may approach `u64::MAX`.
    pub fn total_cores(&self) -> u128 {
        u128::from(self.total_cpu_cores()) + u128::from(self.total_npu_cores())
    }
}

//! Legacy OS task contribution.
//!
//! The OS task runs opportunistically on spare CPU cycles and never adds to
//! the per-inference latency. What it does affect is whether the CPU dies
//! can host it at all, and how busy (and therefore how power hungry) the
//! CPU cores are.

use serde::Serialize;

use crate::chiplet::ChipletConfig;
use crate::config::CpuConfig;

/// Capacity check for the concurrent legacy OS task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OsTaskReport {
    /// DMIPS the task requires.
    pub demand_dmips: f64,
    /// DMIPS all CPU cores together provide.
    pub capacity_dmips: f64,
    /// `demand / capacity`, unclamped.
    pub utilization: f64,
    /// True only when capacity strictly exceeds demand.
    pub meetable: bool,
}

/// Total DMIPS the CPU dies can provide.
pub fn dmips_capacity(config: &ChipletConfig, cpu: &CpuConfig) -> f64 {
    config.total_cpu_cores() as f64 * cpu.dmips_per_core
}

/// Evaluates the OS task against the CPU capacity.
pub fn evaluate(config: &ChipletConfig, cpu: &CpuConfig) -> OsTaskReport {
    let demand_dmips = config.linux_dmips();
    let capacity_dmips = dmips_capacity(config, cpu);

    OsTaskReport {
        demand_dmips,
        capacity_dmips,
        utilization: demand_dmips / capacity_dmips,
        meetable: capacity_dmips > demand_dmips,
    }
}

//! Compute-Time Model.
//!
//! Each engine is a pool of identical cores with perfect intra-engine
//! scaling: aggregate throughput is `dies * cores_per_die * flops_per_core`.
//! The CPU and NPU pools are evaluated independently; contention between
//! them is only modelled on the shared interconnect and memory paths.

use serde::Serialize;

use crate::chiplet::ChipletConfig;
use crate::common::units::{secs_to_ms, MS_PER_SEC};
use crate::config::ModelConfig;

/// Per-inference compute time of both engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputeTimes {
    /// CPU FLOPs over aggregate CPU throughput.
    pub cpu_ms: f64,
    /// NPU FLOPs over aggregate NPU throughput.
    pub npu_ms: f64,
}

/// Aggregate peak throughput of an engine in FLOP/s.
///
/// # Arguments
///
/// * `dies` - Number of dies of this engine type.
/// * `cores_per_die` - Cores on each die.
/// * `flops_per_core` - Peak FLOP/s of a single core.
pub fn engine_throughput(dies: u32, cores_per_die: u32, flops_per_core: f64) -> f64 {
    f64::from(dies) * f64::from(cores_per_die) * flops_per_core
}

/// Time in milliseconds to execute `flops_required` at `throughput` FLOP/s.
pub fn compute_time_ms(flops_required: f64, throughput: f64) -> f64 {
    secs_to_ms(flops_required / throughput)
}

/// Evaluates the compute-time model for both engines.
pub fn compute_times(config: &ChipletConfig, model: &ModelConfig) -> ComputeTimes {
    let cpu_throughput = engine_throughput(
        config.cpu_dies(),
        config.cpu_cores_per_die(),
        model.cpu.flops_per_core,
    );
    let npu_throughput = engine_throughput(
        config.npu_dies(),
        config.npu_cores_per_die(),
        model.npu.flops_per_core,
    );

    ComputeTimes {
        cpu_ms: compute_time_ms(config.cpu_flops(), cpu_throughput),
        npu_ms: compute_time_ms(config.npu_flops(), npu_throughput),
    }
}

/// Busy fraction of an engine at the requested inference rate.
///
/// Not clamped; values above 1.0 mean the engine cannot keep up.
pub fn utilization(time_ms: f64, inference_freq: f64) -> f64 {
    time_ms * inference_freq / MS_PER_SEC
}

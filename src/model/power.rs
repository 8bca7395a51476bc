//! Power Model.
//!
//! Linear and additive: static power per die, dynamic power of each engine
//! weighted by how busy it is at the requested inference rate, and a
//! communication term for the energy spent moving data and keeping caches
//! coherent.

use serde::Serialize;

use crate::chiplet::ChipletConfig;
use crate::common::units::{gb_to_bits, J_PER_NJ, J_PER_PJ};
use crate::config::ModelConfig;
use crate::model::compute::{utilization, ComputeTimes};
use crate::model::os_task::OsTaskReport;
use crate::model::overhead::{coherence_hops, memory_traffic_gb};

/// Power components in watts. `total_w` is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerBreakdown {
    /// Idle power of every die plus the memory subsystem.
    pub static_w: f64,
    pub cpu_dynamic_w: f64,
    pub npu_dynamic_w: f64,
    /// Interconnect, coherence and memory activity.
    pub communication_w: f64,
    /// Busy fraction of the CPU cores used for `cpu_dynamic_w`, clamped.
    pub cpu_utilization: f64,
    /// Busy fraction of the NPU cores used for `npu_dynamic_w`, clamped.
    pub npu_utilization: f64,
    pub total_w: f64,
}

/// Static power of the package.
pub fn static_power_w(config: &ChipletConfig, model: &ModelConfig) -> f64 {
    f64::from(config.cpu_dies()) * model.cpu.static_power_w
        + f64::from(config.npu_dies()) * model.npu.static_power_w
        + model.memory.static_power_w
}

/// Dynamic power of an engine pool running at `utilization`.
pub fn dynamic_power_w(cores: u64, power_per_core_w: f64, utilization: f64) -> f64 {
    cores as f64 * power_per_core_w * utilization
}

/// Power spent on data movement and coherence at the requested rate.
///
/// Every inference moves `data_size` over the fabric, the (possibly
/// OS-inflated) traffic through memory, and performs the coherence
/// operations of every die hop.
pub fn communication_power_w(config: &ChipletConfig, model: &ModelConfig) -> f64 {
    let rate = config.inference_freq();

    let fabric_bits = gb_to_bits(config.data_size());
    let interconnect_w = fabric_bits * model.interconnect.energy_pj_per_bit * J_PER_PJ * rate;

    let coherence_ops =
        coherence_hops(config.total_dies()) as f64 * f64::from(model.coherence.ops_per_hop);
    let coherence_w = coherence_ops * model.coherence.energy_nj_per_op * J_PER_NJ * rate;

    let memory_bits = gb_to_bits(memory_traffic_gb(
        config.data_size(),
        config.linux_dmips(),
        &model.memory,
    ));
    let memory_w = memory_bits * model.memory.energy_pj_per_bit * J_PER_PJ * rate;

    interconnect_w + coherence_w + memory_w
}

/// Evaluates the power model.
///
/// # Arguments
///
/// * `config` - Validated package and workload.
/// * `model` - Calibration constants.
/// * `compute` - Compute times from the compute-time model.
/// * `os_task` - OS task capacity check; its load is added to the CPU.
///
/// # Returns
///
/// The full breakdown; `total_w` is the reported power figure.
pub fn estimate_power(
    config: &ChipletConfig,
    model: &ModelConfig,
    compute: &ComputeTimes,
    os_task: &OsTaskReport,
) -> PowerBreakdown {
    let rate = config.inference_freq();
    let cpu_utilization = (utilization(compute.cpu_ms, rate) + os_task.utilization).min(1.0);
    let npu_utilization = utilization(compute.npu_ms, rate).min(1.0);

    let static_w = static_power_w(config, model);
    let cpu_dynamic_w = dynamic_power_w(
        config.total_cpu_cores(),
        model.cpu.power_per_core_w,
        cpu_utilization,
    );
    let npu_dynamic_w = dynamic_power_w(
        config.total_npu_cores(),
        model.npu.power_per_core_w,
        npu_utilization,
    );
    let communication_w = communication_power_w(config, model);

    PowerBreakdown {
        static_w,
        cpu_dynamic_w,
        npu_dynamic_w,
        communication_w,
        cpu_utilization,
        npu_utilization,
        total_w: static_w + cpu_dynamic_w + npu_dynamic_w + communication_w,
    }
}

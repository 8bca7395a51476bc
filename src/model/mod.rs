//! Chiplet Estimator.
//!
//! A single-pass, stateless evaluation of the closed-form model:
//!
//! 1. Compute time of the CPU and NPU pools (`compute`).
//! 2. Interconnect, coherence, synchronization and memory overheads
//!    (`overhead`).
//! 3. Capacity check of the legacy OS task (`os_task`).
//! 4. Strict sum of the six times into the total; power from static,
//!    utilization-weighted dynamic and communication terms (`power`);
//!    latency budget from the inference rate (`budget`).
//!
//! The estimator never fails. All divisors are guaranteed non-zero by the
//! validator that produces `ChipletConfig` and by `ModelConfig::validate`.

use serde::Serialize;

use crate::chiplet::ChipletConfig;
use crate::common::Result;
use crate::config::ModelConfig;

/// Latency budget check.
pub mod budget;

/// Compute-time model.
pub mod compute;

/// Legacy OS task contribution.
pub mod os_task;

/// Communication and overhead model.
pub mod overhead;

/// Power model.
pub mod power;

pub use budget::LatencyBudget;
pub use compute::ComputeTimes;
pub use os_task::OsTaskReport;
pub use overhead::Overheads;
pub use power::PowerBreakdown;

/// Everything estimated for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Echo of the evaluated package shape.
    pub cpu_dies: u32,
    pub cpu_cores_per_die: u32,
    pub npu_dies: u32,
    pub npu_cores_per_die: u32,

    /// CPU pool compute time.
    pub cpu_time_ms: f64,
    /// NPU pool compute time.
    pub npu_time_ms: f64,
    /// Die-to-die data transfer.
    pub interconnect_time_ms: f64,
    /// Cross-die coherence traffic.
    pub coherence_time_ms: f64,
    /// Barrier and handoff cost over all cores.
    pub sync_time_ms: f64,
    /// Shared-memory bandwidth pressure.
    pub memory_time_ms: f64,
    /// Sum of the six times above.
    pub total_time_ms: f64,

    /// Total package power in watts; equals `power.total_w`.
    pub power_w: f64,

    pub power: PowerBreakdown,
    pub os_task: OsTaskReport,
    pub budget: LatencyBudget,
}

impl SimulationResult {
    /// Sum of the six component times.
    pub fn component_sum_ms(&self) -> f64 {
        self.cpu_time_ms
            + self.npu_time_ms
            + self.interconnect_time_ms
            + self.coherence_time_ms
            + self.sync_time_ms
            + self.memory_time_ms
    }
}

/// The estimator: immutable calibration plus the evaluation pipeline.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    model: ModelConfig,
}

impl Estimator {
    /// Creates an estimator after validating the calibration.
    pub fn new(model: ModelConfig) -> Result<Self> {
        model.validate()?;
        Ok(Self { model })
    }

    /// Calibration in use.
    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Estimates latency and power of one inference on `config`.
    ///
    /// Deterministic and side-effect free: the same configuration always
    /// yields the same result.
    pub fn estimate(&self, config: &ChipletConfig) -> SimulationResult {
        let compute = compute::compute_times(config, &self.model);
        let overheads = overhead::overheads(config, &self.model);
        let os_task = os_task::evaluate(config, &self.model.cpu);
        let power = power::estimate_power(config, &self.model, &compute, &os_task);

        let total_time_ms = compute.cpu_ms
            + compute.npu_ms
            + overheads.interconnect_ms
            + overheads.coherence_ms
            + overheads.sync_ms
            + overheads.memory_ms;
        let budget = LatencyBudget::new(config.inference_freq(), total_time_ms);

        log::debug!(
            "estimate {}x{} cpu / {}x{} npu: total {:.4} ms, {:.2} W",
            config.cpu_dies(),
            config.cpu_cores_per_die(),
            config.npu_dies(),
            config.npu_cores_per_die(),
            total_time_ms,
            power.total_w
        );

        SimulationResult {
            cpu_dies: config.cpu_dies(),
            cpu_cores_per_die: config.cpu_cores_per_die(),
            npu_dies: config.npu_dies(),
            npu_cores_per_die: config.npu_cores_per_die(),
            cpu_time_ms: compute.cpu_ms,
            npu_time_ms: compute.npu_ms,
            interconnect_time_ms: overheads.interconnect_ms,
            coherence_time_ms: overheads.coherence_ms,
            sync_time_ms: overheads.sync_ms,
            memory_time_ms: overheads.memory_ms,
            total_time_ms,
            power_w: power.total_w,
            power,
            os_task,
            budget,
        }
    }
}

/// Estimates `config` with the default calibration.
pub fn estimate(config: &ChipletConfig) -> SimulationResult {
    Estimator::default().estimate(config)
}

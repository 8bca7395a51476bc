//! Model calibration.
//!
//! Every constant the estimator uses is a calibration parameter loaded from
//! TOML rather than a literal in the formulas. Sections and fields are all
//! optional: anything left out falls back to the defaults below, which are
//! identical to `configs/default.toml`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

const CPU_FLOPS_PER_CORE: f64 = 4.0e14;
const CPU_DMIPS_PER_CORE: f64 = 4_000.0;
const CPU_STATIC_POWER_W: f64 = 8.0;
const CPU_POWER_PER_CORE_W: f64 = 3.0;

const NPU_FLOPS_PER_CORE: f64 = 3.0e15;
const NPU_STATIC_POWER_W: f64 = 12.0;
const NPU_POWER_PER_CORE_W: f64 = 1.0;

const INTERCONNECT_PJ_PER_BIT: f64 = 2.0;

const COHERENCE_OPS_PER_HOP: u32 = 10;
const COHERENCE_OP_LATENCY_NS: f64 = 20.0;
const COHERENCE_NJ_PER_OP: f64 = 50.0;

const SYNC_LATENCY_PER_CORE_US: f64 = 1.5;

const MEMORY_CONTENTION_PER_CORE: f64 = 0.01;
const MEMORY_STATIC_POWER_W: f64 = 5.0;
const MEMORY_PJ_PER_BIT: f64 = 10.0;

const WORKLOAD_CPU_FLOPS: f64 = 1.0e12;
const WORKLOAD_NPU_FLOPS: f64 = 20.0e12;
const WORKLOAD_INFERENCE_FREQ: f64 = 10.0;
const WORKLOAD_LINUX_DMIPS: f64 = 20_000.0;
const WORKLOAD_DATA_SIZE_GB: f64 = 0.01;

/// Complete calibration of the estimator.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub cpu: CpuConfig,
    pub npu: NpuConfig,
    pub interconnect: InterconnectConfig,
    pub coherence: CoherenceConfig,
    pub sync: SyncConfig,
    pub memory: MemoryConfig,
    pub workload: WorkloadDefaults,
}

impl ModelConfig {
    /// Parses and validates a calibration from TOML text.
    ///
    /// # Arguments
    ///
    /// * `text` - TOML document; missing sections and fields take defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration, or a `Toml`/`Calibration` error.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ModelConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a calibration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded model calibration from {}", path.display());
        Ok(config)
    }

    /// Checks every constant against its admissible range.
    ///
    /// Per-core throughput and DMIPS capacity are divisors and must be
    /// strictly positive. All other constants may be zero, which switches the
    /// corresponding term off, but never negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        positive("cpu.flops_per_core", self.cpu.flops_per_core)?;
        positive("cpu.dmips_per_core", self.cpu.dmips_per_core)?;
        non_negative("cpu.static_power_w", self.cpu.static_power_w)?;
        non_negative("cpu.power_per_core_w", self.cpu.power_per_core_w)?;

        positive("npu.flops_per_core", self.npu.flops_per_core)?;
        non_negative("npu.static_power_w", self.npu.static_power_w)?;
        non_negative("npu.power_per_core_w", self.npu.power_per_core_w)?;

        non_negative(
            "interconnect.energy_pj_per_bit",
            self.interconnect.energy_pj_per_bit,
        )?;

        non_negative("coherence.op_latency_ns", self.coherence.op_latency_ns)?;
        non_negative(
            "coherence.energy_nj_per_op",
            self.coherence.energy_nj_per_op,
        )?;

        non_negative("sync.latency_per_core_us", self.sync.latency_per_core_us)?;

        non_negative(
            "memory.contention_per_core",
            self.memory.contention_per_core,
        )?;
        non_negative(
            "memory.os_traffic_per_kdmips",
            self.memory.os_traffic_per_kdmips,
        )?;
        non_negative("memory.static_power_w", self.memory.static_power_w)?;
        non_negative("memory.energy_pj_per_bit", self.memory.energy_pj_per_bit)?;

        positive("workload.cpu_flops", self.workload.cpu_flops)?;
        positive("workload.npu_flops", self.workload.npu_flops)?;
        positive("workload.inference_freq", self.workload.inference_freq)?;
        positive("workload.linux_dmips", self.workload.linux_dmips)?;
        non_negative("workload.data_size", self.workload.data_size)?;
        Ok(())
    }
}

fn positive(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Calibration {
            key,
            reason: format!("must be a finite number greater than zero, got {}", value),
        })
    }
}

fn non_negative(key: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Calibration {
            key,
            reason: format!("must be a finite, non-negative number, got {}", value),
        })
    }
}

/// CPU engine calibration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CpuConfig {
    /// Peak FLOP/s of one CPU core.
    #[serde(default = "d_cpu_flops")]
    pub flops_per_core: f64,

    /// Dhrystone capacity of one CPU core.
    #[serde(default = "d_cpu_dmips")]
    pub dmips_per_core: f64,

    /// Idle power of one CPU die.
    #[serde(default = "d_cpu_static")]
    pub static_power_w: f64,

    /// Dynamic power of one fully busy CPU core.
    #[serde(default = "d_cpu_core_w")]
    pub power_per_core_w: f64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            flops_per_core: d_cpu_flops(),
            dmips_per_core: d_cpu_dmips(),
            static_power_w: d_cpu_static(),
            power_per_core_w: d_cpu_core_w(),
        }
    }
}

fn d_cpu_flops() -> f64 {
    CPU_FLOPS_PER_CORE
}

fn d_cpu_dmips() -> f64 {
    CPU_DMIPS_PER_CORE
}

fn d_cpu_static() -> f64 {
    CPU_STATIC_POWER_W
}

fn d_cpu_core_w() -> f64 {
    CPU_POWER_PER_CORE_W
}

/// NPU engine calibration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NpuConfig {
    /// Peak FLOP/s of one NPU core.
    #[serde(default = "d_npu_flops")]
    pub flops_per_core: f64,

    /// Idle power of one NPU die.
    #[serde(default = "d_npu_static")]
    pub static_power_w: f64,

    /// Dynamic power of one fully busy NPU core.
    #[serde(default = "d_npu_core_w")]
    pub power_per_core_w: f64,
}

impl Default for NpuConfig {
    fn default() -> Self {
        Self {
            flops_per_core: d_npu_flops(),
            static_power_w: d_npu_static(),
            power_per_core_w: d_npu_core_w(),
        }
    }
}

fn d_npu_flops() -> f64 {
    NPU_FLOPS_PER_CORE
}

fn d_npu_static() -> f64 {
    NPU_STATIC_POWER_W
}

fn d_npu_core_w() -> f64 {
    NPU_POWER_PER_CORE_W
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InterconnectConfig {
    /// Die-to-die transfer energy.
    #[serde(default = "d_ic_pj")]
    pub energy_pj_per_bit: f64,
}

impl Default for InterconnectConfig {
    fn default() -> Self {
        Self {
            energy_pj_per_bit: d_ic_pj(),
        }
    }
}

fn d_ic_pj() -> f64 {
    INTERCONNECT_PJ_PER_BIT
}

/// Cross-die coherence cost per hop.
///
/// A package with `n` dies has `n - 1` hops; each hop costs `ops_per_hop`
/// coherence operations per inference.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoherenceConfig {
    #[serde(default = "d_coh_ops")]
    pub ops_per_hop: u32,

    #[serde(default = "d_coh_lat")]
    pub op_latency_ns: f64,

    #[serde(default = "d_coh_nj")]
    pub energy_nj_per_op: f64,
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            ops_per_hop: d_coh_ops(),
            op_latency_ns: d_coh_lat(),
            energy_nj_per_op: d_coh_nj(),
        }
    }
}

fn d_coh_ops() -> u32 {
    COHERENCE_OPS_PER_HOP
}

fn d_coh_lat() -> f64 {
    COHERENCE_OP_LATENCY_NS
}

fn d_coh_nj() -> f64 {
    COHERENCE_NJ_PER_OP
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Barrier cost contributed by each participating core.
    #[serde(default = "d_sync_us")]
    pub latency_per_core_us: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            latency_per_core_us: d_sync_us(),
        }
    }
}

fn d_sync_us() -> f64 {
    SYNC_LATENCY_PER_CORE_US
}

/// Shared memory calibration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Fractional loss of effective bandwidth per active core.
    #[serde(default = "d_mem_contention")]
    pub contention_per_core: f64,

    /// Extra memory traffic, as a fraction of the inference data volume,
    /// per 1000 DMIPS of concurrent OS load. Zero disables the term.
    #[serde(default)]
    pub os_traffic_per_kdmips: f64,

    #[serde(default = "d_mem_static")]
    pub static_power_w: f64,

    #[serde(default = "d_mem_pj")]
    pub energy_pj_per_bit: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            contention_per_core: d_mem_contention(),
            os_traffic_per_kdmips: 0.0,
            static_power_w: d_mem_static(),
            energy_pj_per_bit: d_mem_pj(),
        }
    }
}

fn d_mem_contention() -> f64 {
    MEMORY_CONTENTION_PER_CORE
}

fn d_mem_static() -> f64 {
    MEMORY_STATIC_POWER_W
}

fn d_mem_pj() -> f64 {
    MEMORY_PJ_PER_BIT
}

/// Workload values used when a configuration omits them.
///
/// Only the workload fields have defaults; hardware shape and bandwidths
/// must always be given explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadDefaults {
    #[serde(default = "d_wl_cpu")]
    pub cpu_flops: f64,

    #[serde(default = "d_wl_npu")]
    pub npu_flops: f64,

    #[serde(default = "d_wl_freq")]
    pub inference_freq: f64,

    #[serde(default = "d_wl_dmips")]
    pub linux_dmips: f64,

    #[serde(default = "d_wl_data")]
    pub data_size: f64,
}

impl Default for WorkloadDefaults {
    fn default() -> Self {
        Self {
            cpu_flops: d_wl_cpu(),
            npu_flops: d_wl_npu(),
            inference_freq: d_wl_freq(),
            linux_dmips: d_wl_dmips(),
            data_size: d_wl_data(),
        }
    }
}

fn d_wl_cpu() -> f64 {
    WORKLOAD_CPU_FLOPS
}

fn d_wl_npu() -> f64 {
    WORKLOAD_NPU_FLOPS
}

fn d_wl_freq() -> f64 {
    WORKLOAD_INFERENCE_FREQ
}

fn d_wl_dmips() -> f64 {
    WORKLOAD_LINUX_DMIPS
}

fn d_wl_data() -> f64 {
    WORKLOAD_DATA_SIZE_GB
}

//! Communication & Overhead Model.
//!
//! Four independent terms that the raw compute time ignores. They are
//! purely additive and never overlap with compute in the total.

use serde::Serialize;

use crate::chiplet::ChipletConfig;
use crate::common::units::{secs_to_ms, DMIPS_PER_KDMIPS, NS_PER_MS, US_PER_MS};
use crate::config::{CoherenceConfig, MemoryConfig, ModelConfig, SyncConfig};

/// The four overhead components of one inference, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overheads {
    pub interconnect_ms: f64,
    pub coherence_ms: f64,
    pub sync_ms: f64,
    pub memory_ms: f64,
}

impl Overheads {
    /// Sum of the four overheads.
    pub fn total_ms(&self) -> f64 {
        self.interconnect_ms + self.coherence_ms + self.sync_ms + self.memory_ms
    }
}

/// Time to move one inference's data across the die-to-die fabric.
///
/// Strictly inversely proportional to bandwidth and zero for zero data.
pub fn interconnect_time_ms(data_size_gb: f64, interconnect_bw: f64) -> f64 {
    secs_to_ms(data_size_gb / interconnect_bw)
}

/// Number of die-to-die hops coherence traffic has to cross.
pub fn coherence_hops(total_dies: u64) -> u64 {
    total_dies.saturating_sub(1)
}

/// Coherence cost of keeping shared state consistent across all dies.
///
/// # Arguments
///
/// * `total_dies` - CPU plus NPU dies in the package.
/// * `coherence` - Per-hop operation count and latency.
///
/// # Returns
///
/// Zero for a single-die package, growing linearly with each added die.
pub fn coherence_time_ms(total_dies: u64, coherence: &CoherenceConfig) -> f64 {
    let ops = coherence_hops(total_dies) as f64 * f64::from(coherence.ops_per_hop);
    ops * coherence.op_latency_ns / NS_PER_MS
}

/// Barrier/handoff cost across every participating core.
pub fn sync_time_ms(total_cores: u128, sync: &SyncConfig) -> f64 {
    total_cores as f64 * sync.latency_per_core_us / US_PER_MS
}

/// Memory bandwidth left after per-core contention.
pub fn effective_memory_bw(memory_bw: f64, total_cores: u128, memory: &MemoryConfig) -> f64 {
    memory_bw / (1.0 + memory.contention_per_core * total_cores as f64)
}

/// Memory volume per inference, including OS-driven traffic if configured.
pub fn memory_traffic_gb(data_size_gb: f64, linux_dmips: f64, memory: &MemoryConfig) -> f64 {
    let os_share = memory.os_traffic_per_kdmips * linux_dmips / DMIPS_PER_KDMIPS;
    data_size_gb * (1.0 + os_share)
}

/// Shared-memory bandwidth pressure, distinct from the fabric transfer.
pub fn memory_time_ms(config: &ChipletConfig, memory: &MemoryConfig) -> f64 {
    let traffic = memory_traffic_gb(config.data_size(), config.linux_dmips(), memory);
    let bandwidth = effective_memory_bw(config.memory_bw(), config.total_cores(), memory);
    secs_to_ms(traffic / bandwidth)
}

/// Evaluates all four overhead terms.
pub fn overheads(config: &ChipletConfig, model: &ModelConfig) -> Overheads {
    Overheads {
        interconnect_ms: interconnect_time_ms(config.data_size(), config.interconnect_bw()),
        coherence_ms: coherence_time_ms(config.total_dies(), &model.coherence),
        sync_ms: sync_time_ms(config.total_cores(), &model.sync),
        memory_ms: memory_time_ms(config, &model.memory),
    }
}

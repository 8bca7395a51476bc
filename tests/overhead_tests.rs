//! Integration tests for the communication and overhead model.

use chiplet_sim::chiplet::validate;
use chiplet_sim::config::{CoherenceConfig, MemoryConfig, ModelConfig, SyncConfig};
use chiplet_sim::model::overhead::*;
use chiplet_sim::{ChipletConfig, RawConfig, WorkloadDefaults};

fn raw(cpu_dies: u32, npu_dies: u32) -> RawConfig {
    let mut raw = RawConfig::from(&WorkloadDefaults::default());
    raw.set(validate::CPU_DIES, cpu_dies);
    raw.set(validate::CPU_CORES_PER_DIE, 6u32);
    raw.set(validate::NPU_DIES, npu_dies);
    raw.set(validate::NPU_CORES_PER_DIE, 16u32);
    raw.set(validate::INTERCONNECT_BW, 200.0);
    raw.set(validate::MEMORY_BW, 400.0);
    raw
}

fn config(cpu_dies: u32, npu_dies: u32) -> ChipletConfig {
    raw(cpu_dies, npu_dies).validate().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Tests the interconnect transfer time.
#[test]
fn test_interconnect_time() {
    assert_close(interconnect_time_ms(0.01, 200.0), 0.05);
    assert_eq!(interconnect_time_ms(0.0, 200.0), 0.0);
}

/// Tests that doubling bandwidth halves the transfer time.
#[test]
fn test_interconnect_inverse_proportional() {
    for bw in [25.0, 200.0, 333.3, 1024.0] {
        let t = interconnect_time_ms(0.01, bw);
        let t2 = interconnect_time_ms(0.01, bw * 2.0);
        assert!(t2 < t);
        assert_close(t2 * 2.0, t);
    }
}

/// Tests hop counting.
#[test]
fn test_coherence_hops() {
    assert_eq!(coherence_hops(1), 0);
    assert_eq!(coherence_hops(2), 1);
    assert_eq!(coherence_hops(9), 8);
}

/// Tests coherence time grows with die count from zero at a single die.
#[test]
fn test_coherence_time() {
    let coherence = CoherenceConfig::default();

    assert_eq!(coherence_time_ms(1, &coherence), 0.0);
    assert_close(coherence_time_ms(2, &coherence), 10.0 * 20.0 / 1e6);
    assert_close(
        coherence_time_ms(5, &coherence),
        4.0 * coherence_time_ms(2, &coherence),
    );
}

/// Tests synchronization cost proportional to participating cores.
#[test]
fn test_sync_time() {
    let sync = SyncConfig::default();

    assert_close(sync_time_ms(22, &sync), 22.0 * 1.5 / 1000.0);
    assert_close(sync_time_ms(44, &sync), 2.0 * sync_time_ms(22, &sync));
}

/// Tests the contention-derated memory bandwidth.
#[test]
fn test_effective_memory_bw() {
    let memory = MemoryConfig::default();
    assert_close(effective_memory_bw(400.0, 22, &memory), 400.0 / 1.22);

    let no_contention = MemoryConfig {
        contention_per_core: 0.0,
        ..MemoryConfig::default()
    };
    assert_eq!(effective_memory_bw(400.0, 22, &no_contention), 400.0);
}

/// Tests the memory term on the baseline.
#[test]
fn test_memory_time_baseline() {
    let t = memory_time_ms(&config(1, 1), &MemoryConfig::default());
    assert_close(t, 0.01 / (400.0 / 1.22) * 1000.0);
}

/// Tests the optional OS-driven memory traffic.
#[test]
fn test_memory_os_traffic() {
    let memory = MemoryConfig {
        os_traffic_per_kdmips: 0.05,
        ..MemoryConfig::default()
    };

    // 20000 DMIPS -> 20 kDMIPS * 0.05 = +100%
    assert_close(memory_traffic_gb(0.01, 20_000.0, &memory), 0.02);
    assert_close(
        memory_time_ms(&config(1, 1), &memory),
        2.0 * memory_time_ms(&config(1, 1), &MemoryConfig::default()),
    );
    assert_eq!(memory_traffic_gb(0.0, 20_000.0, &memory), 0.0);
}

/// Tests that zero data volume zeroes both data-driven terms.
#[test]
fn test_zero_data_size() {
    let mut raw = raw(2, 2);
    raw.set(validate::DATA_SIZE, 0.0);
    let overheads = overheads(&raw.validate().unwrap(), &ModelConfig::default());

    assert_eq!(overheads.interconnect_ms, 0.0);
    assert_eq!(overheads.memory_ms, 0.0);
    assert!(overheads.coherence_ms > 0.0);
    assert!(overheads.sync_ms > 0.0);
}

/// Tests that the four terms sum to the overhead total.
#[test]
fn test_overheads_total() {
    let o = overheads(&config(2, 3), &ModelConfig::default());
    assert_close(
        o.total_ms(),
        o.interconnect_ms + o.coherence_ms + o.sync_ms + o.memory_ms,
    );
}

/// Tests that the largest accepted counts do not overflow the core total.
#[test]
fn test_max_counts_core_total() {
    let mut raw = raw(1, 1);
    for field in [
        validate::CPU_DIES,
        validate::CPU_CORES_PER_DIE,
        validate::NPU_DIES,
        validate::NPU_CORES_PER_DIE,
    ] {
        raw.set(field, "4294967295");
    }
    let config = raw.validate().unwrap();

    let per_engine = u128::from(u32::MAX) * u128::from(u32::MAX);
    assert_eq!(config.total_cores(), 2 * per_engine);

    let r = chiplet_sim::estimate(&config);
    let expected_sync = 2.0 * (u32::MAX as f64) * (u32::MAX as f64) * 1.5 / 1000.0;
    assert_close(r.sync_time_ms, expected_sync);
    assert!(r.sync_time_ms > 5.5e16);
    assert!(r.memory_time_ms.is_finite() && r.memory_time_ms > 0.0);
    assert!(r.total_time_ms.is_finite());
}

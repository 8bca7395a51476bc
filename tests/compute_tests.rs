//! Integration tests for the compute-time model.

use chiplet_sim::chiplet::validate;
use chiplet_sim::config::ModelConfig;
use chiplet_sim::model::compute::*;
use chiplet_sim::{ChipletConfig, RawConfig};

fn config(cpu_dies: u32, cpu_cores: u32, npu_dies: u32, npu_cores: u32) -> ChipletConfig {
    let mut raw = RawConfig::from(&chiplet_sim::WorkloadDefaults::default());
    raw.set(validate::CPU_DIES, cpu_dies);
    raw.set(validate::CPU_CORES_PER_DIE, cpu_cores);
    raw.set(validate::NPU_DIES, npu_dies);
    raw.set(validate::NPU_CORES_PER_DIE, npu_cores);
    raw.set(validate::INTERCONNECT_BW, 200.0);
    raw.set(validate::MEMORY_BW, 400.0);
    raw.validate().unwrap()
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

/// Tests aggregate throughput scaling.
#[test]
fn test_engine_throughput() {
    assert_eq!(engine_throughput(1, 1, 5.0e9), 5.0e9);
    assert_eq!(engine_throughput(2, 8, 1.0e9), 16.0e9);
}

/// Tests the time formula and its millisecond conversion.
#[test]
fn test_compute_time_ms() {
    assert_close(compute_time_ms(1e9, 1e9), 1000.0);
    assert_close(compute_time_ms(1e12, 2.4e15), 1e12 / 2.4e15 * 1000.0);
}

/// Tests the baseline package with default calibration.
#[test]
fn test_compute_times_baseline() {
    let times = compute_times(&config(1, 6, 1, 16), &ModelConfig::default());

    assert_close(times.cpu_ms, 1e12 / (6.0 * 4.0e14) * 1000.0);
    assert_close(times.npu_ms, 20e12 / (16.0 * 3.0e15) * 1000.0);
    assert_close(times.cpu_ms, times.npu_ms);
}

/// Tests that one die with one core gets exactly the per-core throughput.
#[test]
fn test_single_core_degenerates() {
    let model = ModelConfig::default();
    let times = compute_times(&config(1, 1, 1, 1), &model);

    assert_close(times.cpu_ms, 1e12 / model.cpu.flops_per_core * 1000.0);
    assert_close(times.npu_ms, 20e12 / model.npu.flops_per_core * 1000.0);
}

/// Tests monotonic non-increasing time as dies and cores grow.
#[test]
fn test_scaling_is_monotonic() {
    let model = ModelConfig::default();
    let mut previous = f64::INFINITY;
    for dies in [1, 2, 4, 8, 16] {
        let t = compute_times(&config(dies, 6, 1, 16), &model).cpu_ms;
        assert!(t <= previous);
        assert!(t > 0.0);
        previous = t;
    }

    let one = compute_times(&config(1, 6, 1, 16), &model).cpu_ms;
    let two = compute_times(&config(2, 6, 1, 16), &model).cpu_ms;
    assert_close(two, one / 2.0);
}

/// Tests that CPU and NPU are computed independently.
#[test]
fn test_engines_independent() {
    let model = ModelConfig::default();
    let base = compute_times(&config(1, 6, 1, 16), &model);
    let more_npu = compute_times(&config(1, 6, 4, 16), &model);

    assert_eq!(base.cpu_ms, more_npu.cpu_ms);
    assert!(more_npu.npu_ms < base.npu_ms);
}

/// Tests utilization at the requested inference rate.
#[test]
fn test_utilization() {
    assert_close(utilization(10.0, 10.0), 0.1);
    assert_close(utilization(250.0, 8.0), 2.0);
}

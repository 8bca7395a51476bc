//! Integration tests for the power model and OS task check.

use chiplet_sim::chiplet::validate;
use chiplet_sim::config::ModelConfig;
use chiplet_sim::model::compute::compute_times;
use chiplet_sim::model::os_task;
use chiplet_sim::model::power::*;
use chiplet_sim::{ChipletConfig, RawConfig, WorkloadDefaults};

fn raw(cpu_dies: u32, cpu_cores: u32, npu_dies: u32, npu_cores: u32) -> RawConfig {
    let mut raw = RawConfig::from(&WorkloadDefaults::default());
    raw.set(validate::CPU_DIES, cpu_dies);
    raw.set(validate::CPU_CORES_PER_DIE, cpu_cores);
    raw.set(validate::NPU_DIES, npu_dies);
    raw.set(validate::NPU_CORES_PER_DIE, npu_cores);
    raw.set(validate::INTERCONNECT_BW, 200.0);
    raw.set(validate::MEMORY_BW, 400.0);
    raw
}

fn power_of(config: &ChipletConfig, model: &ModelConfig) -> PowerBreakdown {
    let compute = compute_times(config, model);
    let os = os_task::evaluate(config, &model.cpu);
    estimate_power(config, model, &compute, &os)
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

/// Tests static power per die plus the memory subsystem.
#[test]
fn test_static_power() {
    let model = ModelConfig::default();

    let one = raw(1, 6, 1, 16).validate().unwrap();
    assert_close(static_power_w(&one, &model), 8.0 + 12.0 + 5.0);

    let many = raw(2, 6, 3, 16).validate().unwrap();
    assert_close(static_power_w(&many, &model), 2.0 * 8.0 + 3.0 * 12.0 + 5.0);
}

/// Tests the linear dynamic power term.
#[test]
fn test_dynamic_power() {
    assert_eq!(dynamic_power_w(6, 3.0, 1.0), 18.0);
    assert_eq!(dynamic_power_w(6, 3.0, 0.5), 9.0);
    assert_eq!(dynamic_power_w(16, 1.0, 0.0), 0.0);
}

/// Tests the baseline breakdown against hand-computed values.
#[test]
fn test_power_breakdown_baseline() {
    let model = ModelConfig::default();
    let config = raw(1, 6, 1, 16).validate().unwrap();
    let p = power_of(&config, &model);

    let engine_util = 1e12 / (6.0 * 4.0e14) * 10.0;
    let os_util = 20_000.0 / 24_000.0;

    assert_close(p.static_w, 25.0);
    assert_close(p.cpu_utilization, engine_util + os_util);
    assert_close(p.npu_utilization, engine_util);
    assert_close(p.cpu_dynamic_w, 18.0 * (engine_util + os_util));
    assert_close(p.npu_dynamic_w, 16.0 * engine_util);

    // 0.01 GB = 8e7 bits at 10 inferences/s
    let interconnect = 8e7 * 2e-12 * 10.0;
    let coherence = 10.0 * 50e-9 * 10.0;
    let memory = 8e7 * 10e-12 * 10.0;
    assert_close(p.communication_w, interconnect + coherence + memory);

    assert_close(
        p.total_w,
        p.static_w + p.cpu_dynamic_w + p.npu_dynamic_w + p.communication_w,
    );
    assert!(p.total_w > 10.0 && p.total_w < 100.0);
}

/// Tests that utilization saturates at one for overloaded engines.
#[test]
fn test_utilization_clamped() {
    let mut raw = raw(1, 1, 1, 1);
    raw.set(validate::INFERENCE_FREQ, 1e6);
    let config = raw.validate().unwrap();
    let p = power_of(&config, &ModelConfig::default());

    assert_eq!(p.cpu_utilization, 1.0);
    assert_eq!(p.npu_utilization, 1.0);
    assert_close(p.cpu_dynamic_w, 3.0);
    assert_close(p.npu_dynamic_w, 1.0);
}

/// Tests that only coherence traffic remains when no data moves.
#[test]
fn test_communication_power_without_data() {
    let mut raw = raw(1, 6, 1, 16);
    raw.set(validate::DATA_SIZE, 0.0);
    let model = ModelConfig::default();

    let two_dies = raw.validate().unwrap();
    assert_close(
        communication_power_w(&two_dies, &model),
        10.0 * 50e-9 * 10.0,
    );
}

/// Tests the DMIPS capacity check.
#[test]
fn test_os_task_meetable() {
    let model = ModelConfig::default();

    let config = raw(1, 6, 1, 16).validate().unwrap();
    let report = os_task::evaluate(&config, &model.cpu);
    assert_eq!(report.demand_dmips, 20_000.0);
    assert_eq!(report.capacity_dmips, 24_000.0);
    assert!(report.meetable);

    let small = raw(1, 4, 1, 16).validate().unwrap();
    let report = os_task::evaluate(&small, &model.cpu);
    assert_eq!(report.capacity_dmips, 16_000.0);
    assert!(!report.meetable);
    assert!(report.utilization > 1.0);
}

/// Tests that capacity equal to demand is not enough.
#[test]
fn test_os_task_requires_strict_excess() {
    let mut raw = raw(1, 5, 1, 16);
    raw.set(validate::LINUX_DMIPS, 20_000.0);
    let config = raw.validate().unwrap();

    let report = os_task::evaluate(&config, &ModelConfig::default().cpu);
    assert_eq!(report.capacity_dmips, 20_000.0);
    assert!(!report.meetable);
}

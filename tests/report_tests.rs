//! Integration tests for result rendering.

use chiplet_sim::chiplet::validate;
use chiplet_sim::report::*;
use chiplet_sim::*;

fn baseline() -> SimulationResult {
    let mut raw = RawConfig::from(&WorkloadDefaults::default());
    raw.set(validate::CPU_DIES, 1u32);
    raw.set(validate::CPU_CORES_PER_DIE, 6u32);
    raw.set(validate::NPU_DIES, 1u32);
    raw.set(validate::NPU_CORES_PER_DIE, 16u32);
    raw.set(validate::INTERCONNECT_BW, 200.0);
    raw.set(validate::MEMORY_BW, 400.0);
    estimate(&raw.validate().unwrap())
}

/// Tests the cell formatting of one row.
#[test]
fn test_row_rounds_to_two_decimals() {
    let cells = row(&baseline());

    assert_eq!(cells[0], "1");
    assert_eq!(cells[1], "6");
    assert_eq!(cells[2], "1");
    assert_eq!(cells[3], "16");
    assert_eq!(cells[4], "0.42");
    assert_eq!(cells[5], "0.42");
    assert_eq!(cells[6], "0.05");
    assert_eq!(cells[7], "0.00");
    assert_eq!(cells[8], "0.03");
    assert_eq!(cells[9], "0.03");
    assert_eq!(cells[10], "0.95");
    assert_eq!(cells[11], "40.15");
}

/// Tests the grid layout: borders, header rule and one line per row.
#[test]
fn test_render_table_layout() {
    let result = baseline();
    let table = render_table([&result, &result]);
    let lines: Vec<&str> = table.lines().collect();

    // top rule, header, header rule, (row, rule) x 2
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("+-"));
    assert!(lines[2].starts_with("+="));
    for header in HEADERS {
        assert!(lines[1].contains(header));
    }
    assert!(lines[3].contains("40.15"));

    let width = lines[0].len();
    assert!(lines.iter().all(|l| l.len() == width));
    assert_eq!(lines[1].matches('|').count(), HEADERS.len() + 1);
}

/// Tests that an empty result set still renders the header.
#[test]
fn test_render_table_empty() {
    let table = render_table(std::iter::empty());
    assert_eq!(table.lines().count(), 3);
    assert!(table.contains("Power (W)"));
}

/// Tests JSON rendering.
#[test]
fn test_render_json() {
    let json = render_json(&[baseline()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let entry = &value[0];
    assert_eq!(entry["cpu_dies"], 1);
    assert_eq!(entry["npu_cores_per_die"], 16);
    assert!(entry["total_time_ms"].as_f64().unwrap() < 1.0);
    assert!(entry["power"]["static_w"].as_f64().is_some());
    assert_eq!(entry["os_task"]["meetable"], true);
    assert_eq!(entry["budget"]["meets_rate"], true);
}

/// Tests the breakdown block.
#[test]
fn test_render_breakdown() {
    let text = render_breakdown(&baseline());

    assert!(text.contains("CONFIGURATION 1x6 CPU / 1x16 NPU"));
    assert!(text.contains("power.static           25.00 W"));
    assert!(text.contains("os.capacity            24000 DMIPS"));
    assert!(text.contains("os.meetable            yes"));
    assert!(text.contains("budget.per_inference   100.00 ms"));
    assert!(text.contains("budget.meets_rate      yes"));
}

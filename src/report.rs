//! Result reporting.
//!
//! Renders estimates as a grid table (one row per configuration, reals to
//! two decimals), as JSON, or as a per-configuration breakdown of power,
//! OS task and latency budget. Everything renders to a `String`; printing is
//! left to the caller.

use crate::model::SimulationResult;

/// Column headers of the result table, in order.
pub const HEADERS: [&str; 12] = [
    "CPU Dies",
    "CPU Cores/Die",
    "NPU Dies",
    "NPU Cores/Die",
    "CPU Time (ms)",
    "NPU Time (ms)",
    "Interconnect (ms)",
    "Coherence (ms)",
    "Sync (ms)",
    "Memory (ms)",
    "Total Time (ms)",
    "Power (W)",
];

/// Formats one result as table cells.
pub fn row(result: &SimulationResult) -> [String; 12] {
    [
        result.cpu_dies.to_string(),
        result.cpu_cores_per_die.to_string(),
        result.npu_dies.to_string(),
        result.npu_cores_per_die.to_string(),
        format!("{:.2}", result.cpu_time_ms),
        format!("{:.2}", result.npu_time_ms),
        format!("{:.2}", result.interconnect_time_ms),
        format!("{:.2}", result.coherence_time_ms),
        format!("{:.2}", result.sync_time_ms),
        format!("{:.2}", result.memory_time_ms),
        format!("{:.2}", result.total_time_ms),
        format!("{:.2}", result.power_w),
    ]
}

/// Renders results as a grid table.
///
/// Headers are left aligned and values right aligned. An empty input still
/// renders the header block.
pub fn render_table<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = &'a SimulationResult>,
{
    let rows: Vec<[String; 12]> = results.into_iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.len());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    rule(&mut out, &widths, '-');
    out.push('|');
    for (header, width) in HEADERS.iter().zip(widths.iter()) {
        out.push_str(&format!(" {:<w$} |", header, w = *width));
    }
    out.push('\n');
    rule(&mut out, &widths, '=');

    for cells in &rows {
        out.push('|');
        for (cell, width) in cells.iter().zip(widths.iter()) {
            out.push_str(&format!(" {:>w$} |", cell, w = *width));
        }
        out.push('\n');
        rule(&mut out, &widths, '-');
    }
    out
}

fn rule(out: &mut String, widths: &[usize], fill: char) {
    out.push('+');
    for width in widths {
        for _ in 0..width + 2 {
            out.push(fill);
        }
        out.push('+');
    }
    out.push('\n');
}

/// Renders results as a pretty-printed JSON array.
pub fn render_json(results: &[SimulationResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Renders the detailed breakdown of one result.
pub fn render_breakdown(result: &SimulationResult) -> String {
    const HEAVY: &str = "==========================================================";
    const LIGHT: &str = "----------------------------------------------------------";

    let p = &result.power;
    let os = &result.os_task;
    let b = &result.budget;
    let pct = |part: f64| {
        if result.power_w > 0.0 {
            part / result.power_w * 100.0
        } else {
            0.0
        }
    };

    let lines = [
        HEAVY.to_string(),
        format!(
            "CONFIGURATION {}x{} CPU / {}x{} NPU",
            result.cpu_dies, result.cpu_cores_per_die, result.npu_dies, result.npu_cores_per_die
        ),
        LIGHT.to_string(),
        "POWER BREAKDOWN".to_string(),
        format!(
            "  power.static           {:.2} W ({:.2}%)",
            p.static_w,
            pct(p.static_w)
        ),
        format!(
            "  power.cpu_dynamic      {:.2} W ({:.2}%)",
            p.cpu_dynamic_w,
            pct(p.cpu_dynamic_w)
        ),
        format!(
            "  power.npu_dynamic      {:.2} W ({:.2}%)",
            p.npu_dynamic_w,
            pct(p.npu_dynamic_w)
        ),
        format!(
            "  power.communication    {:.4} W ({:.2}%)",
            p.communication_w,
            pct(p.communication_w)
        ),
        format!("  power.total            {:.2} W", p.total_w),
        format!("  util.cpu               {:.2}%", p.cpu_utilization * 100.0),
        format!("  util.npu               {:.2}%", p.npu_utilization * 100.0),
        LIGHT.to_string(),
        "OS TASK".to_string(),
        format!("  os.demand              {:.0} DMIPS", os.demand_dmips),
        format!("  os.capacity            {:.0} DMIPS", os.capacity_dmips),
        format!("  os.utilization         {:.2}%", os.utilization * 100.0),
        format!("  os.meetable            {}", yes_no(os.meetable)),
        LIGHT.to_string(),
        "LATENCY BUDGET".to_string(),
        format!("  budget.per_inference   {:.2} ms", b.budget_ms),
        format!("  budget.total           {:.4} ms", result.total_time_ms),
        format!("  budget.slack           {:.4} ms", b.slack_ms),
        format!("  budget.meets_rate      {}", yes_no(b.meets_rate)),
        HEAVY.to_string(),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

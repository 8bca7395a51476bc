//! Latency budget derived from the requested inference rate.

use serde::Serialize;

use crate::common::units::MS_PER_SEC;

/// Whether one inference fits in the time slot the rate allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyBudget {
    /// `1000 / inference_freq`.
    pub budget_ms: f64,
    /// Budget minus total latency; negative when over budget.
    pub slack_ms: f64,
    /// Total latency fits within the budget (inclusive).
    pub meets_rate: bool,
}

impl LatencyBudget {
    /// Budget for `inference_freq` inferences/s against `total_time_ms`.
    pub fn new(inference_freq: f64, total_time_ms: f64) -> Self {
        let budget_ms = MS_PER_SEC / inference_freq;
        Self {
            budget_ms,
            slack_ms: budget_ms - total_time_ms,
            meets_rate: total_time_ms <= budget_ms,
        }
    }
}

// In crates/analytics/src/types.rs

use core_types::{DrawdownCurve, EquityCurve};
use serde::{Deserialize, Serialize};

/// Risk/return statistics of a single return series, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Metrics {
    /// Annualized Sharpe ratio; `0` when the series has no variance.
    pub sharpe: f64,
    /// Final equity minus the base, in percentage points.
    pub total_return_pct: f64,
    /// Most negative point of the drawdown curve (`0` if never underwater).
    pub max_drawdown_pct: f64,
    /// Share of strictly positive periods.
    pub win_rate_pct: f64,
    /// Compound annual growth rate implied by the series.
    pub cagr_pct: f64,
}

/// Metrics plus the curves they were derived from, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PerformanceReport {
    pub metrics: Metrics,
    pub equity_curve: EquityCurve,
    pub drawdown_curve: DrawdownCurve,
}

/// In-sample versus out-of-sample statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SplitReport {
    /// Index of the first out-of-sample period.
    pub split_index: usize,
    pub in_sample: Metrics,
    pub out_of_sample: Metrics,
}

// In crates/backtester/src/types.rs

use analytics::{PerformanceReport, SplitReport};
use chrono::NaiveDate;
use core_types::Symbol;
use serde::{Deserialize, Serialize};

/// One daily observation as delivered by a price source. A missing close
/// (`null`) is a gap the provider fills before handing prices to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close: Some(close) }
    }
}

/// The outcome of running one signal rule over one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub rule: String,
    pub symbol: Symbol,
    /// Share of periods spent long or short.
    pub exposure_pct: f64,
    /// Metrics over the whole history, with curves for charting.
    pub performance: PerformanceReport,
    /// The same history split into in-sample and out-of-sample periods.
    pub split: SplitReport,
}

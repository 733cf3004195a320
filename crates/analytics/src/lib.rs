// In crates/analytics/src/lib.rs

pub mod engine;
pub mod equity;
pub mod portfolio;
pub mod synthetic;
pub mod types;

// Re-export the most important types for easy access.
pub use engine::{AnalyticsEngine, compute_metrics};
pub use equity::{derive_drawdown, derive_equity};
pub use portfolio::combine_equal_weight;
pub use synthetic::{SyntheticParams, generate};
pub use types::{Metrics, PerformanceReport, SplitReport};

/// Trading days per year, used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// The value every equity curve starts from.
pub const DEFAULT_BASE: f64 = 100.0;

// In crates/zoo/src/types.rs

use core_types::{EquityCurve, StrategyId};
use serde::Serialize;
use store::{StrategyRecord, StrategyStatus};

/// Which records a zoo view should show. The default shows everything.
#[derive(Debug, Clone, Default)]
pub struct ZooFilter {
    /// Minimum out-of-sample Sharpe ratio.
    pub min_sharpe: Option<f64>,
    /// Accepted statuses; empty accepts all.
    pub statuses: Vec<StrategyStatus>,
    /// Case-insensitive substring of the causal-edge label.
    pub search: Option<String>,
}

impl ZooFilter {
    pub fn matches(&self, record: &StrategyRecord) -> bool {
        if let Some(min_sharpe) = self.min_sharpe {
            if record.oos.sharpe < min_sharpe {
                return false;
            }
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&record.status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => record
                .causal_edge
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// Leaderboard statistics and the combined curve of the best strategies.
#[derive(Debug, Clone, Serialize)]
pub struct ZooSummary {
    /// The best records by out-of-sample Sharpe, best first.
    pub leaders: Vec<StrategyRecord>,
    pub avg_oos_sharpe: f64,
    pub avg_oos_max_drawdown_pct: f64,
    /// The strategies combined into `combined_equity`.
    pub portfolio: Vec<StrategyId>,
    /// Equal-weight equity curve of `portfolio`, starting from 100.
    pub combined_equity: EquityCurve,
}

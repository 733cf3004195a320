// In crates/store/src/types.rs

use analytics::{AnalyticsEngine, Metrics, SyntheticParams};
use core_types::{ReturnSeries, StrategyId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version of the record layout. Bumped whenever a derived column is added, so
/// that records are always complete from the moment they are created.
pub const SCHEMA_VERSION: u32 = 1;

/// Lifecycle stage of a strategy in the zoo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyStatus {
    Live,
    Staging,
    Breeding,
}

impl StrategyStatus {
    pub const ALL: [StrategyStatus; 3] = [StrategyStatus::Live, StrategyStatus::Staging, StrategyStatus::Breeding];
}

impl fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyStatus::Live => "Live",
            StrategyStatus::Staging => "Staging",
            StrategyStatus::Breeding => "Breeding",
        };
        f.pad(label)
    }
}

impl FromStr for StrategyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(StrategyStatus::Live),
            "staging" => Ok(StrategyStatus::Staging),
            "breeding" => Ok(StrategyStatus::Breeding),
            other => Err(format!("unknown strategy status '{other}' (expected live, staging or breeding)")),
        }
    }
}

/// One strategy in the zoo, with every derived column already computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecord {
    pub schema_version: u32,
    pub id: StrategyId,
    /// Descriptive label shown next to the strategy.
    pub causal_edge: String,
    pub status: StrategyStatus,
    /// Annualized Sharpe the synthetic generator aims for.
    pub target_sharpe: f64,
    /// Out-of-sample statistics of the strategy's synthetic return stream.
    pub oos: Metrics,
}

impl StrategyRecord {
    /// Creates a record and derives its out-of-sample metrics.
    ///
    /// The metrics are a pure function of `(id, target_sharpe, params)`, so a
    /// record can always be rebuilt exactly.
    pub fn new(
        id: StrategyId,
        causal_edge: impl Into<String>,
        status: StrategyStatus,
        target_sharpe: f64,
        params: &SyntheticParams,
    ) -> Self {
        let returns = params.generate(id.seed(), target_sharpe);
        let oos = AnalyticsEngine::new().compute_metrics(&returns);
        Self {
            schema_version: SCHEMA_VERSION,
            id,
            causal_edge: causal_edge.into(),
            status,
            target_sharpe,
            oos,
        }
    }

    /// Regenerates the synthetic return stream behind the record's metrics.
    pub fn returns(&self, params: &SyntheticParams) -> ReturnSeries {
        params.generate(self.id.seed(), self.target_sharpe)
    }
}

// In crates/backtester/src/lib.rs

pub mod error;
pub mod provider;
pub mod types;

pub use error::{Error, Result};
pub use provider::{JsonFilePriceProvider, PriceProvider, StaticPriceProvider};
pub use types::{PricePoint, RuleReport};

use analytics::AnalyticsEngine;
use anyhow::Context;
use core_types::{Position, PriceSeries, StrategyConfig, Symbol};
use strategies::{SignalRule, strategy_returns};
use tracing::{info, warn};

/// Runs signal rules over real price history and scores them with the same
/// analytics the synthetic strategies go through.
pub struct Backtester {
    /// The rules to evaluate, each independently.
    pub rules: Vec<Box<dyn SignalRule + Send + Sync>>,
    engine: AnalyticsEngine,
    in_sample_fraction: f64,
}

impl Backtester {
    pub fn new(rules: Vec<Box<dyn SignalRule + Send + Sync>>, in_sample_fraction: f64) -> Self {
        Self {
            rules,
            engine: AnalyticsEngine::new(),
            in_sample_fraction,
        }
    }

    /// Builds the rules from configuration. `benchmark` feeds `pair_correlation`.
    pub fn from_configs(
        configs: &[StrategyConfig],
        benchmark: Option<&PriceSeries>,
        in_sample_fraction: f64,
    ) -> anyhow::Result<Self> {
        let rules = strategies::factory::create_rules(configs, benchmark)?;
        Ok(Self::new(rules, in_sample_fraction))
    }

    /// Evaluates every rule against `prices`. The first failing rule aborts
    /// the run with context naming it.
    pub fn run(&self, symbol: &Symbol, prices: &PriceSeries) -> anyhow::Result<Vec<RuleReport>> {
        if self.rules.is_empty() {
            warn!(%symbol, "Backtest requested with no signal rules configured.");
        }
        info!(%symbol, periods = prices.len(), rules = self.rules.len(), "Starting backtest.");

        let mut reports = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let report = self
                .run_rule(rule.as_ref(), symbol, prices)
                .with_context(|| format!("Signal rule '{}' failed on {}", rule.name(), symbol))?;
            info!(
                rule = rule.name(),
                sharpe = report.performance.metrics.sharpe,
                oos_sharpe = report.split.out_of_sample.sharpe,
                "Rule evaluated."
            );
            reports.push(report);
        }
        Ok(reports)
    }

    fn run_rule(
        &self,
        rule: &(dyn SignalRule + Send + Sync),
        symbol: &Symbol,
        prices: &PriceSeries,
    ) -> core_types::Result<RuleReport> {
        // --- 1. Positions, then the returns they earn ---
        let positions = rule.positions(prices)?;
        let returns = strategy_returns(prices, &positions)?;

        // --- 2. Score the full history and the IS/OOS split ---
        let performance = self.engine.report(&returns);
        let split = self.engine.evaluate_split(&returns, self.in_sample_fraction);

        Ok(RuleReport {
            rule: rule.name().to_string(),
            symbol: symbol.clone(),
            exposure_pct: exposure_pct(&positions),
            performance,
            split,
        })
    }
}

fn exposure_pct(positions: &[Position]) -> f64 {
    if positions.is_empty() {
        return 0.0;
    }
    let active = positions.iter().filter(|p| **p != Position::Flat).count();
    active as f64 / positions.len() as f64 * 100.0
}

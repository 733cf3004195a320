// In crates/zoo/src/lib.rs

use analytics::{SyntheticParams, combine_equal_weight};
use core_types::StrategyId;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::ops::RangeInclusive;
use store::{StrategyRecord, StrategyStatus, StrategyStore};

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ZooFilter, ZooSummary};

const SEED_EDGES: [&str; 8] = [
    "AI Capex Shock",
    "Satellite Inventory",
    "Dark Pool Momentum",
    "Options Skew Term",
    "Geopolitical Delta",
    "Credit Card Proxy",
    "Shipping + Earnings",
    "Quantum Vol Surface",
];
const SEED_TAIL_EDGE: &str = "Multi-Modal News";
const SEED_TAIL_LEN: u64 = 4;
const SEED_SHARPE_RANGE: RangeInclusive<f64> = 2.4..=6.1;

const EVOLVED_EDGES: [&str; 5] = [
    "Supply Chain Causality",
    "Sentiment Regime Switch",
    "Liquidity Teleport Beta",
    "Quantum-Inspired Carry",
    "Multi-Modal News Causality",
];
const EVOLVED_TAIL_EDGE: &str = "Dark Pool Acceleration";
const EVOLVED_TAIL_LEN: u64 = 2;
const EVOLVED_SHARPE_RANGE: RangeInclusive<f64> = 3.1..=7.8;
const FIRST_EVOLVED_NUMBER: u64 = 10_000;

/// Keeps the attribute stream of a record independent from its return stream,
/// which is seeded with the bare id seed.
const ATTRIBUTE_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The strategy zoo: creates, evolves and ranks strategy records held in an
/// injected store.
pub struct Zoo<S: StrategyStore> {
    store: S,
    params: SyntheticParams,
}

impl<S: StrategyStore> Zoo<S> {
    pub fn new(store: S, params: SyntheticParams) -> Self {
        Self { store, params }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn params(&self) -> &SyntheticParams {
        &self.params
    }

    /// Fills an empty zoo with `size` records `EA-00001..`. A zoo that already
    /// holds records is left untouched. Returns the number of records added.
    pub fn seed(&mut self, size: u64) -> Result<usize> {
        if !self.store.is_empty() {
            tracing::debug!(existing = self.store.len(), "Zoo already seeded.");
            return Ok(0);
        }

        let records: Vec<StrategyRecord> = (0..size)
            .map(|i| {
                let id = StrategyId::zoo(i + 1);
                let edge = if i + SEED_TAIL_LEN >= size {
                    SEED_TAIL_EDGE
                } else {
                    SEED_EDGES[(i % SEED_EDGES.len() as u64) as usize]
                };
                let mut rng = attribute_stream(&id);
                let target_sharpe = round_cents(rng.random_range(SEED_SHARPE_RANGE));
                let status = StrategyStatus::ALL[rng.random_range(0..StrategyStatus::ALL.len())];
                StrategyRecord::new(id, edge, status, target_sharpe, &self.params)
            })
            .collect();

        let added = records.len();
        self.store.append(records)?;
        tracing::info!(added, "Seeded strategy zoo.");
        Ok(added)
    }

    /// Runs one evolution cycle: appends `count` new `Staging` strategies with
    /// ids continuing after the last evolved record (starting at `EA-10000`).
    pub fn evolve(&mut self, count: u64) -> Result<Vec<StrategyId>> {
        // Only zoo-format ids take part in the numbering; foreign ids put into
        // the store by hand are ignored.
        let last_evolved = self
            .store
            .all()
            .iter()
            .filter_map(|record| record.id.zoo_number())
            .filter(|number| *number >= FIRST_EVOLVED_NUMBER)
            .max();
        let first = match last_evolved {
            Some(last) => last.checked_add(1),
            None => Some(FIRST_EVOLVED_NUMBER),
        };
        let first = first
            .filter(|first| count == 0 || first.checked_add(count - 1).is_some())
            .ok_or(Error::IdSpaceExhausted {
                last: last_evolved.unwrap_or(FIRST_EVOLVED_NUMBER),
                count,
            })?;

        let records: Vec<StrategyRecord> = (0..count)
            .map(|i| {
                let id = StrategyId::zoo(first + i);
                let name = if i + EVOLVED_TAIL_LEN >= count {
                    EVOLVED_TAIL_EDGE
                } else {
                    EVOLVED_EDGES[(i % EVOLVED_EDGES.len() as u64) as usize]
                };
                let mut rng = attribute_stream(&id);
                let target_sharpe = round_cents(rng.random_range(EVOLVED_SHARPE_RANGE));
                StrategyRecord::new(
                    id,
                    format!("Novel {name}"),
                    StrategyStatus::Staging,
                    target_sharpe,
                    &self.params,
                )
            })
            .collect();

        let ids: Vec<StrategyId> = records.iter().map(|record| record.id.clone()).collect();
        self.store.append(records)?;
        tracing::info!(added = ids.len(), total = self.store.len(), "Evolution cycle complete.");
        Ok(ids)
    }

    /// Records matching `filter`, in store order.
    pub fn filter(&self, filter: &ZooFilter) -> Vec<&StrategyRecord> {
        self.store
            .all()
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// The `n` records with the highest out-of-sample Sharpe, best first.
    /// Ties are broken by id so the order is stable.
    pub fn top_by_oos_sharpe(&self, n: usize) -> Vec<&StrategyRecord> {
        let mut ranked = self.store.all();
        ranked.sort_by(|a, b| b.oos.sharpe.total_cmp(&a.oos.sharpe).then_with(|| a.id.cmp(&b.id)));
        ranked.truncate(n);
        ranked
    }

    /// Averages over the top `top_n` records and the combined equity curve of
    /// the best `portfolio_size` of them.
    pub fn summary(&self, top_n: usize, portfolio_size: usize) -> Result<ZooSummary> {
        let leaders = self.top_by_oos_sharpe(top_n.max(portfolio_size));
        let ranked = &leaders[..leaders.len().min(top_n)];

        let average = |field: fn(&StrategyRecord) -> f64| {
            if ranked.is_empty() {
                0.0
            } else {
                ranked.iter().map(|record| field(record)).sum::<f64>() / ranked.len() as f64
            }
        };
        let avg_oos_sharpe = average(|record| record.oos.sharpe);
        let avg_oos_max_drawdown_pct = average(|record| record.oos.max_drawdown_pct);

        let portfolio = &leaders[..leaders.len().min(portfolio_size)];
        let series: Vec<_> = portfolio.iter().map(|record| record.returns(&self.params)).collect();
        let combined_equity = combine_equal_weight(&series, self.params.periods)?;

        Ok(ZooSummary {
            leaders: ranked.iter().map(|record| (*record).clone()).collect(),
            avg_oos_sharpe,
            avg_oos_max_drawdown_pct,
            portfolio: portfolio.iter().map(|record| record.id.clone()).collect(),
            combined_equity,
        })
    }
}

fn attribute_stream(id: &StrategyId) -> Pcg64 {
    Pcg64::seed_from_u64(id.seed() ^ ATTRIBUTE_SALT)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

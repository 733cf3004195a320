// In crates/strategies/src/pair_correlation.rs

use crate::SignalRule;
use crate::types::PairCorrelationSettings;
use anyhow::{Result, ensure};
use core_types::{Error, Position, PriceSeries};

/// Follows a benchmark while the asset moves with it: when the rolling
/// correlation of daily returns reaches `threshold`, the rule takes the
/// direction of the benchmark's latest move.
#[derive(Debug, Clone)]
pub struct PairCorrelation {
    settings: PairCorrelationSettings,
    benchmark: PriceSeries,
}

impl PairCorrelation {
    pub fn new(settings: PairCorrelationSettings, benchmark: PriceSeries) -> Result<Self> {
        ensure!(settings.window >= 2, "pair_correlation: window must be at least 2");
        ensure!(
            (-1.0..=1.0).contains(&settings.threshold),
            "pair_correlation: threshold must lie in [-1, 1]"
        );
        Ok(Self { settings, benchmark })
    }
}

impl SignalRule for PairCorrelation {
    fn name(&self) -> &'static str {
        "pair_correlation"
    }

    fn positions(&self, prices: &PriceSeries) -> core_types::Result<Vec<Position>> {
        if self.benchmark.len() != prices.len() {
            return Err(Error::LengthMismatch {
                index: 1,
                expected: prices.len(),
                found: self.benchmark.len(),
            });
        }

        let asset = prices.pct_change()?;
        let benchmark = self.benchmark.pct_change()?;
        let window = self.settings.window;
        let mut positions = vec![Position::Flat; asset.len()];

        // Return windows start at index 1; index 0 is the placeholder change.
        for i in window..asset.len() {
            let span = i + 1 - window..i + 1;
            let Some(correlation) = pearson(&asset[span.clone()], &benchmark[span]) else {
                continue;
            };
            if correlation >= self.settings.threshold {
                positions[i] = if benchmark[i] > 0.0 {
                    Position::Long
                } else if benchmark[i] < 0.0 {
                    Position::Short
                } else {
                    Position::Flat
                };
            }
        }
        Ok(positions)
    }
}

/// Pearson correlation of two equally long samples; `None` when either side
/// has no variance.
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}

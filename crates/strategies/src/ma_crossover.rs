// In crates/strategies/src/ma_crossover.rs

use crate::types::MACrossoverSettings;
use crate::{SignalRule, rolling};
use anyhow::{Result, anyhow, ensure};
use core_types::{Position, PriceSeries};
use ta::indicators::SimpleMovingAverage as Sma;

/// Trend-following rule: long while the fast moving average sits above the
/// slow one, short while it sits below.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this rule instance.
    settings: MACrossoverSettings,
    fast_sma: Sma,
    slow_sma: Sma,
}

impl MACrossover {
    /// Creates a new `MACrossover` rule from its settings.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        ensure!(settings.fast_period >= 1, "ma_crossover: fast_period must be at least 1");
        ensure!(
            settings.fast_period < settings.slow_period,
            "ma_crossover: fast_period ({}) must be shorter than slow_period ({})",
            settings.fast_period,
            settings.slow_period
        );

        let fast_sma = Sma::new(settings.fast_period).map_err(|e| anyhow!("ma_crossover fast SMA: {:?}", e))?;
        let slow_sma = Sma::new(settings.slow_period).map_err(|e| anyhow!("ma_crossover slow SMA: {:?}", e))?;
        Ok(Self {
            settings,
            fast_sma,
            slow_sma,
        })
    }
}

impl SignalRule for MACrossover {
    fn name(&self) -> &'static str {
        "ma_crossover"
    }

    fn positions(&self, prices: &PriceSeries) -> core_types::Result<Vec<Position>> {
        let closes = prices.closes();
        let fast = rolling(self.fast_sma.clone(), self.settings.fast_period, closes);
        let slow = rolling(self.slow_sma.clone(), self.settings.slow_period, closes);

        Ok(fast
            .into_iter()
            .zip(slow)
            .map(|pair| match pair {
                (Some(fast), Some(slow)) if fast > slow => Position::Long,
                (Some(fast), Some(slow)) if fast < slow => Position::Short,
                _ => Position::Flat,
            })
            .collect())
    }
}

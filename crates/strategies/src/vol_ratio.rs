// In crates/strategies/src/vol_ratio.rs

use crate::types::VolRatioSettings;
use crate::{SignalRule, rolling};
use anyhow::{Result, anyhow, ensure};
use core_types::{Position, PriceSeries};
use ta::indicators::StandardDeviation;

/// Volatility-regime rule: compares short-window to long-window realized
/// volatility of daily returns. Calm regimes are held long, expanding
/// volatility is held short.
#[derive(Debug, Clone)]
pub struct VolRatio {
    settings: VolRatioSettings,
    short_std: StandardDeviation,
    long_std: StandardDeviation,
}

impl VolRatio {
    pub fn new(settings: VolRatioSettings) -> Result<Self> {
        ensure!(settings.short_window >= 2, "vol_ratio: short_window must be at least 2");
        ensure!(
            settings.short_window < settings.long_window,
            "vol_ratio: short_window ({}) must be shorter than long_window ({})",
            settings.short_window,
            settings.long_window
        );
        ensure!(
            settings.low_threshold <= settings.high_threshold,
            "vol_ratio: low_threshold must not exceed high_threshold"
        );

        Ok(Self {
            short_std: StandardDeviation::new(settings.short_window)
                .map_err(|e| anyhow!("vol_ratio short window: {:?}", e))?,
            long_std: StandardDeviation::new(settings.long_window)
                .map_err(|e| anyhow!("vol_ratio long window: {:?}", e))?,
            settings,
        })
    }
}

impl SignalRule for VolRatio {
    fn name(&self) -> &'static str {
        "vol_ratio"
    }

    fn positions(&self, prices: &PriceSeries) -> core_types::Result<Vec<Position>> {
        let changes = prices.pct_change()?;
        let mut positions = vec![Position::Flat; changes.len()];
        if changes.len() < 2 {
            return Ok(positions);
        }

        // The first change is a placeholder; windows start at the first real return.
        let returns = &changes[1..];
        let short = rolling(self.short_std.clone(), self.settings.short_window, returns);
        let long = rolling(self.long_std.clone(), self.settings.long_window, returns);

        for (i, window) in short.into_iter().zip(long).enumerate() {
            if let (Some(short_vol), Some(long_vol)) = window {
                if long_vol <= 0.0 {
                    continue;
                }
                let ratio = short_vol / long_vol;
                positions[i + 1] = if ratio < self.settings.low_threshold {
                    Position::Long
                } else if ratio > self.settings.high_threshold {
                    Position::Short
                } else {
                    Position::Flat
                };
            }
        }
        Ok(positions)
    }
}

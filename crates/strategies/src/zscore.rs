// In crates/strategies/src/zscore.rs

use crate::types::ZScoreSettings;
use crate::{SignalRule, rolling};
use anyhow::{Result, anyhow, ensure};
use core_types::{Position, PriceSeries};
use ta::indicators::{SimpleMovingAverage as Sma, StandardDeviation};

/// Mean-reversion rule: fades prices that stretch more than `entry` rolling
/// standard deviations away from their rolling mean.
#[derive(Debug, Clone)]
pub struct ZScore {
    settings: ZScoreSettings,
    mean: Sma,
    std_dev: StandardDeviation,
}

impl ZScore {
    pub fn new(settings: ZScoreSettings) -> Result<Self> {
        ensure!(settings.window >= 2, "zscore: window must be at least 2");
        ensure!(
            settings.entry.is_finite() && settings.entry > 0.0,
            "zscore: entry must be a positive number"
        );
        Ok(Self {
            mean: Sma::new(settings.window).map_err(|e| anyhow!("zscore mean: {:?}", e))?,
            std_dev: StandardDeviation::new(settings.window).map_err(|e| anyhow!("zscore std: {:?}", e))?,
            settings,
        })
    }
}

impl SignalRule for ZScore {
    fn name(&self) -> &'static str {
        "zscore"
    }

    fn positions(&self, prices: &PriceSeries) -> core_types::Result<Vec<Position>> {
        let closes = prices.closes();
        let means = rolling(self.mean.clone(), self.settings.window, closes);
        let stds = rolling(self.std_dev.clone(), self.settings.window, closes);

        Ok(closes
            .iter()
            .zip(means.into_iter().zip(stds))
            .map(|(price, window)| match window {
                (Some(mean), Some(std)) if std > f64::EPSILON * mean.abs() => {
                    let z = (price - mean) / std;
                    if z > self.settings.entry {
                        Position::Short
                    } else if z < -self.settings.entry {
                        Position::Long
                    } else {
                        Position::Flat
                    }
                }
                _ => Position::Flat,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ZScore {
        ZScore::new(ZScoreSettings { window: 5, entry: 1.5 }).unwrap()
    }

    #[test]
    fn spike_above_mean_is_faded() {
        let mut closes = vec![100.0; 10];
        closes.push(120.0);
        let positions = rule().positions(&PriceSeries::new(closes).unwrap()).unwrap();
        // Flat history has no dispersion; the spike sits two deviations above.
        assert!(positions[..10].iter().all(|p| *p == Position::Flat));
        assert_eq!(positions[10], Position::Short);
    }

    #[test]
    fn crash_below_mean_is_bought() {
        let mut closes = vec![100.0; 10];
        closes.push(80.0);
        let positions = rule().positions(&PriceSeries::new(closes).unwrap()).unwrap();
        assert_eq!(positions[10], Position::Long);
    }

    #[test]
    fn rejects_degenerate_settings() {
        assert!(ZScore::new(ZScoreSettings { window: 1, entry: 1.0 }).is_err());
        assert!(ZScore::new(ZScoreSettings { window: 5, entry: 0.0 }).is_err());
    }
}

// In crates/strategies/src/lib.rs

use core_types::{Error, Position, PriceSeries, ReturnSeries};
use ta::Next;

pub mod factory;
pub mod ma_crossover;
pub mod pair_correlation;
pub mod types;
pub mod vol_ratio;
pub mod zscore;

/// The universal interface for a price-driven signal rule.
///
/// A rule maps a full price history to one position per period. Rules are
/// stateless between calls: every call rebuilds its rolling windows from the
/// first price, so the same history always yields the same positions.
pub trait SignalRule {
    /// The name of the rule, as used in the settings file.
    fn name(&self) -> &'static str;

    /// Computes the position held at the close of every period.
    ///
    /// Periods before the rule's rolling windows are full are `Flat`.
    fn positions(&self, prices: &PriceSeries) -> core_types::Result<Vec<Position>>;
}

/// Turns a position series into strategy returns.
///
/// The position decided at the close of period `t - 1` earns the price change
/// of period `t`, so no signal trades on the bar it was computed from. The
/// first period has no prior position and returns `0`.
pub fn strategy_returns(prices: &PriceSeries, positions: &[Position]) -> core_types::Result<ReturnSeries> {
    if positions.len() != prices.len() {
        return Err(Error::LengthMismatch {
            index: 0,
            expected: prices.len(),
            found: positions.len(),
        });
    }

    let changes = prices.pct_change()?;
    let mut returns = Vec::with_capacity(changes.len());
    if changes.is_empty() {
        return Ok(returns);
    }
    returns.push(0.0);
    for (t, change) in changes.iter().enumerate().skip(1) {
        returns.push(positions[t - 1].as_f64() * change);
    }
    Ok(returns)
}

/// Feeds `values` through a rolling indicator, reporting `None` until the
/// window of `period` observations is full.
pub(crate) fn rolling<I>(mut indicator: I, period: usize, values: &[f64]) -> Vec<Option<f64>>
where
    I: Next<f64, Output = f64>,
{
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let output = indicator.next(*value);
            (i + 1 >= period).then_some(output)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta::indicators::SimpleMovingAverage as Sma;

    #[test]
    fn returns_use_previous_position() {
        let prices = PriceSeries::new(vec![100.0, 110.0, 99.0]).unwrap();
        let positions = [Position::Long, Position::Short, Position::Flat];
        let returns = strategy_returns(&prices, &positions).unwrap();
        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], 0.0);
        assert!((returns[1] - 0.10).abs() < 1e-12);
        // Short held into a -10% move earns +10%.
        assert!((returns[2] - 0.10).abs() < 1e-12);
    }

    #[test]
    fn returns_reject_misaligned_positions() {
        let prices = PriceSeries::new(vec![100.0, 101.0]).unwrap();
        let err = strategy_returns(&prices, &[Position::Long]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn rolling_waits_for_a_full_window() {
        let sma = Sma::new(3).unwrap();
        let out = rolling(sma, 3, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
    }
}

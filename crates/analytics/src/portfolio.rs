// In crates/analytics/src/portfolio.rs

use crate::DEFAULT_BASE;
use crate::equity::derive_equity;
use core_types::{EquityCurve, Error, Result};

/// Combines several strategies into an equal-weight portfolio equity curve.
///
/// Each series is compounded into its own growth-factor curve (base 1.0), the
/// factors are averaged period by period, and the average is scaled to the
/// default base of 100. Every series must have exactly `periods` returns;
/// nothing is truncated or padded.
pub fn combine_equal_weight<S: AsRef<[f64]>>(series_list: &[S], periods: usize) -> Result<EquityCurve> {
    // --- 1. Validate every input before doing any work ---
    for (index, series) in series_list.iter().enumerate() {
        let found = series.as_ref().len();
        if found != periods {
            tracing::warn!(index, expected = periods, found, "Refusing to combine series of unequal length.");
            return Err(Error::LengthMismatch {
                index,
                expected: periods,
                found,
            });
        }
    }

    if series_list.is_empty() {
        return Ok(Vec::new());
    }

    // --- 2. Average the per-strategy growth factors ---
    let mut summed = vec![0.0; periods];
    for series in series_list {
        let growth = derive_equity(series.as_ref(), 1.0);
        for (total, factor) in summed.iter_mut().zip(growth) {
            *total += factor;
        }
    }

    let weight = series_list.len() as f64;
    Ok(summed
        .into_iter()
        .map(|total| total / weight * DEFAULT_BASE)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::generate;

    #[test]
    fn identical_series_match_single_equity_curve() {
        let returns = generate(11, 780, 0.0185, 3.0);
        let combined = combine_equal_weight(&[returns.clone(), returns.clone()], 780).unwrap();
        let single = derive_equity(&returns, 100.0);
        assert_eq!(combined.len(), single.len());
        for (c, s) in combined.iter().zip(&single) {
            assert!((c - s).abs() <= 1e-9 * s.abs().max(1.0));
        }
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let long = vec![0.0; 780];
        let short = vec![0.0; 700];
        let err = combine_equal_weight(&[long, short], 780).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                index: 1,
                expected: 780,
                found: 700
            }
        );
    }

    #[test]
    fn averages_growth_factors_not_returns() {
        // One strategy doubles then flat, the other halves then flat.
        let up = vec![1.0, 0.0];
        let down = vec![-0.5, 0.0];
        let combined = combine_equal_weight(&[up, down], 2).unwrap();
        assert!((combined[0] - 125.0).abs() < 1e-12);
        assert!((combined[1] - 125.0).abs() < 1e-12);
    }

    #[test]
    fn empty_list_gives_empty_curve() {
        let none: [Vec<f64>; 0] = [];
        assert!(combine_equal_weight(&none, 780).unwrap().is_empty());
    }
}

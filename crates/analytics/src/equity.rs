// In crates/analytics/src/equity.rs

use core_types::{DrawdownCurve, EquityCurve};

/// Compounds a return series into an equity curve starting from `base`.
///
/// `equity[0] = base * (1 + r[0])` and every following point compounds the
/// previous one.
pub fn derive_equity(returns: &[f64], base: f64) -> EquityCurve {
    returns
        .iter()
        .scan(base, |value, r| {
            *value *= 1.0 + r;
            Some(*value)
        })
        .collect()
}

/// Percentage drop of each point below the highest value seen so far.
///
/// The running maximum starts at `equity[0]`. A curve whose peak is not
/// positive has been wiped out and reports `-100`.
pub fn derive_drawdown(equity: &[f64]) -> DrawdownCurve {
    let mut peak = f64::NEG_INFINITY;
    equity
        .iter()
        .map(|&value| {
            peak = peak.max(value);
            if peak > 0.0 {
                (value / peak - 1.0) * 100.0
            } else {
                -100.0
            }
        })
        .collect()
}

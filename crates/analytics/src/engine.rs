use crate::equity::{derive_drawdown, derive_equity};
use crate::types::{Metrics, PerformanceReport, SplitReport};
use crate::{DEFAULT_BASE, TRADING_DAYS_PER_YEAR};

/// Relative tolerance under which a standard deviation is considered zero.
/// Summing a constant series leaves rounding residue of a few ULPs, which must
/// not turn into an astronomically large Sharpe ratio.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Absolute floor for the same check when the mean itself is (near) zero.
const ABSOLUTE_VARIANCE_FLOOR: f64 = 1e-15;

/// The engine responsible for turning return series into performance metrics.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    base: f64,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self { base: DEFAULT_BASE }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose equity curves start at `base` instead of 100.
    pub fn with_base(base: f64) -> Self {
        Self { base }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Calculates the scalar metrics of a return series.
    pub fn compute_metrics(&self, returns: &[f64]) -> Metrics {
        if returns.is_empty() {
            return Metrics::default();
        }
        let equity = derive_equity(returns, self.base);
        let drawdown = derive_drawdown(&equity);
        self.metrics_from_curves(returns, &equity, &drawdown)
    }

    /// Calculates the metrics and keeps the curves for the caller to chart.
    pub fn report(&self, returns: &[f64]) -> PerformanceReport {
        let equity_curve = derive_equity(returns, self.base);
        let drawdown_curve = derive_drawdown(&equity_curve);
        let metrics = if returns.is_empty() {
            Metrics::default()
        } else {
            self.metrics_from_curves(returns, &equity_curve, &drawdown_curve)
        };
        PerformanceReport {
            metrics,
            equity_curve,
            drawdown_curve,
        }
    }

    /// Splits the series at `in_sample_fraction` and evaluates both halves
    /// independently, each from its own base.
    pub fn evaluate_split(&self, returns: &[f64], in_sample_fraction: f64) -> SplitReport {
        let (in_sample, out_of_sample) = split_sample(returns, in_sample_fraction);
        tracing::debug!(
            periods = returns.len(),
            in_sample = in_sample.len(),
            out_of_sample = out_of_sample.len(),
            "Evaluating in/out-of-sample split."
        );
        SplitReport {
            split_index: in_sample.len(),
            in_sample: self.compute_metrics(in_sample),
            out_of_sample: self.compute_metrics(out_of_sample),
        }
    }

    fn metrics_from_curves(&self, returns: &[f64], equity: &[f64], drawdown: &[f64]) -> Metrics {
        let final_equity = equity.last().copied().unwrap_or(self.base);

        // Win rate counts strictly positive periods only.
        let wins = returns.iter().filter(|r| **r > 0.0).count();

        Metrics {
            sharpe: sharpe_ratio(returns),
            total_return_pct: final_equity - self.base,
            max_drawdown_pct: drawdown.iter().copied().fold(0.0, f64::min),
            win_rate_pct: wins as f64 / returns.len() as f64 * 100.0,
            cagr_pct: cagr_pct(final_equity / self.base, returns.len()),
        }
    }
}

/// Metrics of a return series on the default base of 100.
pub fn compute_metrics(returns: &[f64]) -> Metrics {
    AnalyticsEngine::default().compute_metrics(returns)
}

/// Splits a series into its in-sample head and out-of-sample tail.
/// The split index is `floor(len * fraction)`, with the fraction clamped to `[0, 1]`.
pub fn split_sample(returns: &[f64], in_sample_fraction: f64) -> (&[f64], &[f64]) {
    let fraction = in_sample_fraction.clamp(0.0, 1.0);
    let split = ((returns.len() as f64 * fraction).floor() as usize).min(returns.len());
    returns.split_at(split)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Annualized Sharpe ratio of daily returns. Zero-variance series report `0`.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let mean_return = mean(returns);
    let std = std_dev(returns);
    let noise_floor = (mean_return.abs() * ZERO_VARIANCE_TOLERANCE).max(ABSOLUTE_VARIANCE_FLOOR);
    if std.is_nan() || std <= noise_floor {
        return 0.0;
    }
    mean_return / std * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Compound annual growth rate, in percent, of a total growth factor realized
/// over `periods` trading days.
pub fn cagr_pct(growth: f64, periods: usize) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    if growth <= 0.0 {
        return -100.0;
    }
    (growth.powf(TRADING_DAYS_PER_YEAR / periods as f64) - 1.0) * 100.0
}

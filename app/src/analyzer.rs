// In app/src/analyzer.rs

use analytics::{Metrics, PerformanceReport, SplitReport};
use anyhow::Result;
use backtester::RuleReport;
use core_types::StrategyId;
use serde::Serialize;
use std::fmt::Write;
use store::StrategyRecord;
use zoo::ZooSummary;

/// Output of the `synth` command.
#[derive(Debug, Serialize)]
pub struct SynthOutput {
    pub id: StrategyId,
    pub seed: u64,
    pub target_sharpe: f64,
    pub report: PerformanceReport,
    pub split: SplitReport,
}

/// Output of the `zoo` command.
#[derive(Debug, Serialize)]
pub struct ZooOutput<'a> {
    pub records: Vec<&'a StrategyRecord>,
    pub summary: ZooSummary,
}

/// Rounds for display. Engine values stay at full precision everywhere else.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn metrics_row(label: &str, metrics: &Metrics) -> String {
    format!(
        "{:<16} {:>8.2} {:>10.2}% {:>10.2}% {:>8.2}% {:>9.2}%",
        label,
        round2(metrics.sharpe),
        round2(metrics.total_return_pct),
        round2(metrics.max_drawdown_pct),
        round2(metrics.win_rate_pct),
        round2(metrics.cagr_pct),
    )
}

fn metrics_header() -> String {
    format!(
        "{:<16} {:>8} {:>11} {:>11} {:>9} {:>10}",
        "", "Sharpe", "Return", "Max DD", "Win", "CAGR"
    )
}

pub fn render_synth(output: &SynthOutput) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (seed {}, target Sharpe {:.2}, {} periods)",
        output.id,
        output.seed,
        output.target_sharpe,
        output.report.equity_curve.len()
    );
    let _ = writeln!(out, "{}", metrics_header());
    let _ = writeln!(out, "{}", metrics_row("Full period", &output.report.metrics));
    let _ = writeln!(out, "{}", metrics_row("In-sample", &output.split.in_sample));
    let _ = writeln!(out, "{}", metrics_row("Out-of-sample", &output.split.out_of_sample));
    if let Some(last) = output.report.equity_curve.last() {
        let _ = writeln!(out, "Final equity: {:.2}", last);
    }
    out
}

pub fn render_zoo(records: &[&StrategyRecord], summary: &ZooSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<36} {:<9} {:>7} {:>8} {:>9} {:>7}",
        "ID", "Causal edge", "Status", "Target", "OOS SR", "OOS DD", "Win"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<10} {:<36} {:<9} {:>7.2} {:>8.2} {:>8.2}% {:>6.2}%",
            record.id,
            record.causal_edge,
            record.status,
            round2(record.target_sharpe),
            round2(record.oos.sharpe),
            round2(record.oos.max_drawdown_pct),
            round2(record.oos.win_rate_pct),
        );
    }
    let _ = writeln!(out, "{} strategies shown.", records.len());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Top {}: avg OOS Sharpe {:.2}, avg OOS max drawdown {:.2}%",
        summary.leaders.len(),
        round2(summary.avg_oos_sharpe),
        round2(summary.avg_oos_max_drawdown_pct),
    );
    let portfolio: Vec<String> = summary.portfolio.iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "Equal-weight portfolio: {}", portfolio.join(", "));
    if let Some(last) = summary.combined_equity.last() {
        let _ = writeln!(out, "Combined final equity: {:.2}", last);
    }
    out
}

pub fn render_backtest(reports: &[RuleReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "{} on {} (exposure {:.1}%, split at {})",
            report.rule,
            report.symbol,
            report.exposure_pct,
            report.split.split_index
        );
        let _ = writeln!(out, "{}", metrics_header());
        let _ = writeln!(out, "{}", metrics_row("Full period", &report.performance.metrics));
        let _ = writeln!(out, "{}", metrics_row("In-sample", &report.split.in_sample));
        let _ = writeln!(out, "{}", metrics_row("Out-of-sample", &report.split.out_of_sample));
        let _ = writeln!(out);
    }
    if reports.is_empty() {
        let _ = writeln!(out, "No signal rules configured under [[backtest.rules]].");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, SyntheticParams};
    use store::StrategyStatus;

    #[test]
    fn rounding_is_display_only() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn metrics_rows_use_two_decimals() {
        let metrics = Metrics {
            sharpe: 2.34567,
            total_return_pct: 45.678,
            max_drawdown_pct: -12.345,
            win_rate_pct: 55.5,
            cagr_pct: 13.1,
        };
        let row = metrics_row("Full period", &metrics);
        assert!(row.contains("2.35"));
        assert!(row.contains("45.68%"));
        assert!(row.contains("-12.35%") || row.contains("-12.34%"));
    }

    #[test]
    fn synth_rendering_includes_every_section() {
        let returns = SyntheticParams::default().generate(42, 3.0);
        let engine = AnalyticsEngine::new();
        let output = SynthOutput {
            id: StrategyId::new("EA-00042"),
            seed: 42,
            target_sharpe: 3.0,
            report: engine.report(&returns),
            split: engine.evaluate_split(&returns, 0.7),
        };
        let text = render_synth(&output);
        assert!(text.starts_with("EA-00042 (seed 42"));
        assert!(text.contains("Out-of-sample"));
        assert!(text.contains("Final equity"));

        let json = to_json(&output).unwrap();
        assert!(json.contains("\"equity_curve\""));
    }

    #[test]
    fn zoo_rendering_lists_records() {
        let record = StrategyRecord::new(
            StrategyId::zoo(1),
            "Dark Pool Momentum",
            StrategyStatus::Live,
            3.2,
            &SyntheticParams::default(),
        );
        let summary = ZooSummary {
            leaders: vec![record.clone()],
            avg_oos_sharpe: record.oos.sharpe,
            avg_oos_max_drawdown_pct: record.oos.max_drawdown_pct,
            portfolio: vec![record.id.clone()],
            combined_equity: vec![100.0, 101.0],
        };
        let text = render_zoo(&[&record], &summary);
        assert!(text.contains("EA-00001"));
        assert!(text.contains("Dark Pool Momentum"));
        assert!(text.contains("1 strategies shown."));
        assert!(text.contains("Combined final equity: 101.00"));
    }

    #[test]
    fn empty_backtest_explains_itself() {
        assert!(render_backtest(&[]).contains("No signal rules configured"));
    }
}

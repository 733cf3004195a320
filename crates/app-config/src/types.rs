// In crates/app-config/src/types.rs

use analytics::SyntheticParams;
use core_types::StrategyConfig;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Parameters of the metrics engine and the synthetic generator.
    #[serde(default)]
    pub engine: EngineSettings,
    /// Sizes used when seeding, evolving and ranking the strategy zoo.
    #[serde(default)]
    pub zoo: ZooSettings,
    /// Signal rules evaluated against real price data.
    #[serde(default)]
    pub backtest: BacktestSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineSettings {
    /// Number of daily periods in every synthetic series (~three trading years).
    #[serde(default = "default_periods")]
    pub periods: usize,
    /// Daily volatility of the synthetic generator.
    #[serde(default = "default_daily_std")]
    pub daily_std: f64,
    /// Share of a real-data series used as the in-sample period.
    #[serde(default = "default_in_sample_fraction")]
    pub in_sample_fraction: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            periods: default_periods(),
            daily_std: default_daily_std(),
            in_sample_fraction: default_in_sample_fraction(),
        }
    }
}

impl EngineSettings {
    pub fn synthetic_params(&self) -> SyntheticParams {
        SyntheticParams {
            periods: self.periods,
            daily_std: self.daily_std,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ZooSettings {
    /// Records created when the zoo is first seeded.
    #[serde(default = "default_initial_size")]
    pub initial_size: u64,
    /// Records appended by one evolution cycle.
    #[serde(default = "default_evolve_batch")]
    pub evolve_batch: u64,
    /// How many records the leaderboard and its averages cover.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// How many of the top records make up the combined equity curve.
    #[serde(default = "default_portfolio_size")]
    pub portfolio_size: usize,
}

impl Default for ZooSettings {
    fn default() -> Self {
        Self {
            initial_size: default_initial_size(),
            evolve_batch: default_evolve_batch(),
            top_n: default_top_n(),
            portfolio_size: default_portfolio_size(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BacktestSettings {
    #[serde(default)]
    pub rules: Vec<StrategyConfig>,
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".into() }
fn default_log_level() -> String { "info".into() }
fn default_periods() -> usize { 780 }
fn default_daily_std() -> f64 { 0.0185 }
fn default_in_sample_fraction() -> f64 { 0.7 }
fn default_initial_size() -> u64 { 20 }
fn default_evolve_batch() -> u64 { 47 }
fn default_top_n() -> usize { 10 }
fn default_portfolio_size() -> usize { 5 }

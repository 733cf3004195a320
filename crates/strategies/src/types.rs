// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MACrossoverSettings {
    /// Window of the fast simple moving average.
    pub fast_period: usize,
    /// Window of the slow simple moving average; must exceed `fast_period`.
    pub slow_period: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VolRatioSettings {
    pub short_window: usize,
    pub long_window: usize,
    /// Below this short/long volatility ratio the market is calm: go long.
    pub low_threshold: f64,
    /// Above this ratio volatility is expanding: go short.
    pub high_threshold: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ZScoreSettings {
    pub window: usize,
    /// Absolute z-score beyond which the rule fades the move.
    pub entry: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PairCorrelationSettings {
    pub window: usize,
    /// Minimum rolling correlation with the benchmark before following it.
    pub threshold: f64,
}

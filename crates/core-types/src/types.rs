// In crates/core-types/src/types.rs

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered daily fractional returns (`0.01` is +1%).
pub type ReturnSeries = Vec<f64>;

/// Portfolio value over time, starting from a fixed base.
pub type EquityCurve = Vec<f64>;

/// Percentage decline from the running peak at each point (always `<= 0`).
pub type DrawdownCurve = Vec<f64>;

/// A market symbol, e.g. `SPY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// The stable identifier of a strategy record. It doubles as the seed source
/// for the record's synthetic return stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrategyId(pub String);

const ZOO_PREFIX: &str = "EA-";
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl StrategyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds a zoo-style identifier, e.g. `EA-00042`.
    pub fn zoo(number: u64) -> Self {
        Self(format!("{ZOO_PREFIX}{number:05}"))
    }

    /// The number of a zoo-style identifier (`EA-00042` -> 42). Any other
    /// shape, including a number that overflows `u64`, is `None`.
    pub fn zoo_number(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(ZOO_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Derives the deterministic seed for this identifier.
    ///
    /// The trailing run of ASCII digits is parsed as the seed (`EA-00042` -> 42).
    /// Identifiers without a numeric suffix (or with one that overflows `u64`)
    /// fall back to the FNV-1a hash of the whole identifier, which is equally
    /// stable across runs and platforms.
    pub fn seed(&self) -> u64 {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i);

        digits_start
            .and_then(|start| self.0[start..].parse::<u64>().ok())
            .unwrap_or_else(|| fnv1a(self.0.as_bytes()))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// The exposure a signal rule holds over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    Short,
    #[default]
    Flat,
    Long,
}

impl Position {
    /// The position as a signed multiplier: `-1`, `0` or `+1`.
    pub fn as_f64(self) -> f64 {
        match self {
            Position::Short => -1.0,
            Position::Flat => 0.0,
            Position::Long => 1.0,
        }
    }
}

/// An ordered, gap-free sequence of closing prices.
///
/// Construction rejects undefined values, so every `PriceSeries` the engine
/// sees is clean. Resolving gaps (forward-fill, dropping days) is the price
/// provider's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    pub fn new(closes: Vec<f64>) -> Result<Self> {
        if let Some(index) = closes.iter().position(|c| !c.is_finite()) {
            return Err(Error::MalformedSeries { index });
        }
        Ok(Self(closes))
    }

    pub fn closes(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Period-over-period fractional change, aligned with the prices.
    ///
    /// The first element has no predecessor and is reported as `0.0`, so the
    /// output always has the same length as the series. A zero price followed
    /// by another observation is rejected as `MalformedSeries`.
    pub fn pct_change(&self) -> Result<ReturnSeries> {
        let mut changes = Vec::with_capacity(self.0.len());
        if self.0.is_empty() {
            return Ok(changes);
        }
        changes.push(0.0);
        for (i, window) in self.0.windows(2).enumerate() {
            if window[0] == 0.0 {
                return Err(Error::MalformedSeries { index: i });
            }
            changes.push(window[1] / window[0] - 1.0);
        }
        Ok(changes)
    }
}

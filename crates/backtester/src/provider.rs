// In crates/backtester/src/provider.rs

use crate::error::{Error, Result};
use crate::types::PricePoint;
use chrono::NaiveDate;
use core_types::{PriceSeries, Symbol};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// A source of adjusted daily closes.
///
/// Implementations own fetching and gap handling; the engine only ever sees
/// the clean `PriceSeries` they return.
pub trait PriceProvider {
    /// Dated closes for `symbol` between `start` and `end` (inclusive, either
    /// bound optional), in date order with gaps already filled.
    fn dated_closes(
        &self,
        symbol: &Symbol,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<(NaiveDate, f64)>>;

    /// Closes for a single symbol, dates dropped.
    fn closes(&self, symbol: &Symbol, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<PriceSeries> {
        let dated = self.dated_closes(symbol, start, end)?;
        Ok(PriceSeries::new(dated.into_iter().map(|(_, close)| close).collect())?)
    }

    /// Closes for several symbols on the dates they all share, so that index
    /// `i` of every returned series refers to the same day. Series come back
    /// in the order of `symbols`.
    fn aligned_closes(
        &self,
        symbols: &[Symbol],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<PriceSeries>> {
        let histories = symbols
            .iter()
            .map(|symbol| {
                let dated = self.dated_closes(symbol, start, end)?;
                Ok(dated.into_iter().collect::<BTreeMap<NaiveDate, f64>>())
            })
            .collect::<Result<Vec<_>>>()?;

        let Some((first, rest)) = histories.split_first() else {
            return Ok(Vec::new());
        };
        let common: Vec<NaiveDate> = first
            .keys()
            .filter(|date| rest.iter().all(|history| history.contains_key(*date)))
            .copied()
            .collect();

        let dropped = histories.iter().map(|h| h.len() - common.len()).max().unwrap_or(0);
        if dropped > 0 {
            tracing::debug!(common = common.len(), dropped, "Dropped dates not shared by every symbol.");
        }

        histories
            .iter()
            .map(|history| {
                let closes = common.iter().filter_map(|date| history.get(date).copied()).collect();
                Ok(PriceSeries::new(closes)?)
            })
            .collect()
    }
}

/// Price history held in memory, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    data: HashMap<String, Vec<PricePoint>>,
}

impl StaticPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(data: HashMap<String, Vec<PricePoint>>) -> Self {
        Self { data }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, points: Vec<PricePoint>) {
        self.data.insert(symbol.into(), points);
    }
}

impl PriceProvider for StaticPriceProvider {
    fn dated_closes(
        &self,
        symbol: &Symbol,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        let points = self
            .data
            .get(&symbol.0)
            .ok_or_else(|| Error::UnknownSymbol(symbol.0.clone()))?;
        select(points, start, end)
    }
}

/// Reads prices from a JSON file shaped like
/// `{ "SPY": [{ "date": "2024-01-02", "close": 472.65 }, ...] }`.
///
/// The file is read on every call, so edits are picked up without restarting.
#[derive(Debug, Clone)]
pub struct JsonFilePriceProvider {
    path: PathBuf,
}

impl JsonFilePriceProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, Vec<PricePoint>>> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PriceProvider for JsonFilePriceProvider {
    fn dated_closes(
        &self,
        symbol: &Symbol,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        let data = self.load()?;
        tracing::debug!(path = %self.path.display(), symbols = data.len(), "Loaded price file.");
        StaticPriceProvider::from_map(data).dated_closes(symbol, start, end)
    }
}

/// Sorts, trims to the date range and forward-fills gaps. Gaps before the
/// first observed close are dropped.
fn select(points: &[PricePoint], start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Vec<(NaiveDate, f64)>> {
    let mut in_range: Vec<&PricePoint> = points
        .iter()
        .filter(|p| start.is_none_or(|s| p.date >= s) && end.is_none_or(|e| p.date <= e))
        .collect();
    in_range.sort_by_key(|p| p.date);

    let mut closes = Vec::with_capacity(in_range.len());
    let mut last_close: Option<f64> = None;
    let mut filled = 0usize;
    for point in in_range {
        match point.close.filter(|c| c.is_finite()) {
            Some(close) => {
                closes.push((point.date, close));
                last_close = Some(close);
            }
            None => {
                if let Some(previous) = last_close {
                    closes.push((point.date, previous));
                    filled += 1;
                }
            }
        }
    }
    if filled > 0 {
        tracing::debug!(filled, "Forward-filled missing closes.");
    }

    Ok(closes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn provider() -> StaticPriceProvider {
        let mut provider = StaticPriceProvider::new();
        provider.insert(
            "SPY",
            vec![
                PricePoint::new(date(3), 101.0),
                PricePoint::new(date(2), 100.0),
                PricePoint { date: date(4), close: None },
                PricePoint::new(date(5), 103.0),
            ],
        );
        provider
    }

    #[test]
    fn sorts_and_forward_fills() {
        let series = provider().closes(&Symbol("SPY".into()), None, None).unwrap();
        assert_eq!(series.closes(), &[100.0, 101.0, 101.0, 103.0]);
    }

    #[test]
    fn applies_inclusive_date_range() {
        let series = provider()
            .closes(&Symbol("SPY".into()), Some(date(3)), Some(date(4)))
            .unwrap();
        assert_eq!(series.closes(), &[101.0, 101.0]);
    }

    #[test]
    fn leading_gaps_are_dropped() {
        let mut provider = StaticPriceProvider::new();
        provider.insert(
            "QQQ",
            vec![PricePoint { date: date(2), close: None }, PricePoint::new(date(3), 400.0)],
        );
        let series = provider.closes(&Symbol("QQQ".into()), None, None).unwrap();
        assert_eq!(series.closes(), &[400.0]);
    }

    fn daily(symbol: &str, days: impl Iterator<Item = u32>) -> (String, Vec<PricePoint>) {
        let points = days.map(|d| PricePoint::new(date(d), 100.0 + f64::from(d))).collect();
        (symbol.to_string(), points)
    }

    #[test]
    fn alignment_drops_days_missing_from_the_benchmark() {
        let provider = StaticPriceProvider::from_map(HashMap::from([
            daily("ASSET", 2..=25),
            daily("BENCH", (2..=25).filter(|d| *d != 10)),
        ]));
        let symbols = [Symbol("ASSET".into()), Symbol("BENCH".into())];
        let aligned = provider.aligned_closes(&symbols, None, None).unwrap();

        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[0].len(), 23);
        assert_eq!(aligned[1].len(), 23);
        // Jan 9 is followed by Jan 11 in both series.
        assert_eq!(aligned[0].closes()[7..9], [109.0, 111.0]);
        assert_eq!(aligned[0].closes(), aligned[1].closes());
    }

    #[test]
    fn alignment_pairs_closes_by_date_not_position() {
        let provider = StaticPriceProvider::from_map(HashMap::from([
            daily("ASSET", 2..=31),
            daily("BENCH", 1..=30),
        ]));
        let symbols = [Symbol("ASSET".into()), Symbol("BENCH".into())];
        let aligned = provider.aligned_closes(&symbols, None, None).unwrap();

        assert_eq!(aligned[0].len(), 29);
        assert_eq!(aligned[0].closes()[0], 102.0);
        assert_eq!(aligned[0].closes(), aligned[1].closes());
    }

    #[test]
    fn alignment_reports_unknown_symbols() {
        let symbols = [Symbol("SPY".into()), Symbol("TSLA".into())];
        let err = provider().aligned_closes(&symbols, None, None).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol(s) if s == "TSLA"));
        assert!(provider().aligned_closes(&[], None, None).unwrap().is_empty());
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let err = provider().closes(&Symbol("TSLA".into()), None, None).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol(s) if s == "TSLA"));
    }

    #[test]
    fn reads_json_price_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.json");
        std::fs::write(
            &path,
            r#"{ "NVDA": [
                { "date": "2024-01-02", "close": 48.2 },
                { "date": "2024-01-03", "close": null },
                { "date": "2024-01-04", "close": 48.9 }
            ] }"#,
        )
        .unwrap();

        let provider = JsonFilePriceProvider::new(&path);
        let series = provider.closes(&Symbol("NVDA".into()), None, None).unwrap();
        assert_eq!(series.closes(), &[48.2, 48.2, 48.9]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let provider = JsonFilePriceProvider::new("/nonexistent/prices.json");
        let err = provider.closes(&Symbol("SPY".into()), None, None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

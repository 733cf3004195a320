// In crates/store/src/lib.rs

use core_types::StrategyId;
use std::collections::HashMap;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{SCHEMA_VERSION, StrategyRecord, StrategyStatus};

/// Storage for strategy records, owned by whoever renders them.
///
/// Records come back in insertion order so tables stay stable between
/// renders.
pub trait StrategyStore {
    /// Fetches one record by id.
    fn get(&self, id: &StrategyId) -> Result<&StrategyRecord>;

    /// Inserts a record, replacing any record with the same id.
    fn put(&mut self, record: StrategyRecord);

    /// Adds a batch of new records. Fails without changing the store if any
    /// id is already present (or repeated within the batch).
    fn append(&mut self, records: Vec<StrategyRecord>) -> Result<()>;

    /// Every record, in insertion order.
    fn all(&self) -> Vec<&StrategyRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory `StrategyStore` that lives as long as its owner.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    records: Vec<StrategyRecord>,
    index: HashMap<StrategyId, usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrategyStore for InMemoryStore {
    fn get(&self, id: &StrategyId) -> Result<&StrategyRecord> {
        self.index
            .get(id)
            .map(|&position| &self.records[position])
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    fn put(&mut self, record: StrategyRecord) {
        match self.index.get(&record.id) {
            Some(&position) => self.records[position] = record,
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    fn append(&mut self, records: Vec<StrategyRecord>) -> Result<()> {
        // --- 1. Validate the whole batch first so a failure changes nothing ---
        let mut incoming = std::collections::HashSet::with_capacity(records.len());
        for record in &records {
            if self.index.contains_key(&record.id) || !incoming.insert(&record.id) {
                return Err(Error::DuplicateId(record.id.clone()));
            }
        }

        // --- 2. Commit ---
        let added = records.len();
        for record in records {
            self.index.insert(record.id.clone(), self.records.len());
            self.records.push(record);
        }
        tracing::debug!(added, total = self.records.len(), "Appended strategy records.");
        Ok(())
    }

    fn all(&self) -> Vec<&StrategyRecord> {
        self.records.iter().collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::SyntheticParams;

    fn record(n: u64, target_sharpe: f64) -> StrategyRecord {
        StrategyRecord::new(
            StrategyId::zoo(n),
            "Dark Pool Momentum",
            StrategyStatus::Live,
            target_sharpe,
            &SyntheticParams::default(),
        )
    }

    #[test]
    fn records_are_created_complete_and_reproducible() {
        let a = record(7, 3.5);
        let b = record(7, 3.5);
        assert_eq!(a.schema_version, SCHEMA_VERSION);
        assert_eq!(a, b);
        assert!((0.0..=100.0).contains(&a.oos.win_rate_pct));
        assert!(a.oos.max_drawdown_pct <= 0.0);
        assert_eq!(a.returns(&SyntheticParams::default()).len(), 780);
    }

    #[test]
    fn put_inserts_then_replaces() {
        let mut store = InMemoryStore::new();
        store.put(record(1, 2.0));
        store.put(record(2, 2.0));
        store.put(record(1, 5.0));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&StrategyId::zoo(1)).unwrap().target_sharpe, 5.0);
        // Replacement keeps the original position.
        assert_eq!(store.all()[0].id, StrategyId::zoo(1));
    }

    #[test]
    fn get_reports_missing_ids() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(
            store.get(&StrategyId::zoo(9)).unwrap_err(),
            Error::NotFound(StrategyId::zoo(9))
        );
    }

    #[test]
    fn append_is_all_or_nothing() {
        let mut store = InMemoryStore::new();
        store.append(vec![record(1, 2.0), record(2, 2.0)]).unwrap();

        let err = store.append(vec![record(3, 2.0), record(2, 4.0)]).unwrap_err();
        assert_eq!(err, Error::DuplicateId(StrategyId::zoo(2)));
        assert_eq!(store.len(), 2);
        assert!(store.get(&StrategyId::zoo(3)).is_err());

        let err = store.append(vec![record(4, 2.0), record(4, 3.0)]).unwrap_err();
        assert_eq!(err, Error::DuplicateId(StrategyId::zoo(4)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in StrategyStatus::ALL {
            assert_eq!(status.to_string().parse::<StrategyStatus>().unwrap(), status);
        }
        assert!("retired".parse::<StrategyStatus>().is_err());
    }
}

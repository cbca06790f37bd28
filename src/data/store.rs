//! In-memory race record store
//!
//! Records are collected while loading, then `finalize` sorts every horse's
//! finish times and builds the rank table. After that the store is read-only
//! and is shared between request handlers behind an `Arc`.

use std::collections::HashMap;
use thiserror::Error;

use polars::prelude::PolarsError;

/// Record store and loading errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),

    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Line {line}: invalid {field} value '{value}'")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Horse {0} not found")]
    NotFound(u32),

    #[error("Rank {rank} out of range (1..={len})")]
    RankNotFound { rank: usize, len: usize },

    #[error("Record store has not been finalized")]
    NotFinalized,

    #[error("Record store is finalized and can no longer be modified")]
    Finalized,
}

/// Race history of a single horse
#[derive(Debug, Clone, PartialEq)]
pub struct RaceRecord {
    pub entity_id: u32,
    /// Entry cost from the first observed row. Informational only.
    pub entry_cost: f64,
    /// Finish times in seconds, ascending once the store is finalized
    pub finish_times: Vec<f64>,
}

impl RaceRecord {
    pub fn new(entity_id: u32, entry_cost: f64) -> Self {
        Self {
            entity_id,
            entry_cost,
            finish_times: Vec::new(),
        }
    }

    /// Number of recorded races
    pub fn race_count(&self) -> usize {
        self.finish_times.len()
    }
}

/// Per-horse race records with O(1) lookup by id and by rank
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Records in first-seen order
    records: Vec<RaceRecord>,
    /// entity_id -> index into `records`
    positions: HashMap<u32, usize>,
    /// rank - 1 -> index into `records`, ordered by entity_id ascending
    ranked: Vec<usize>,
    finalized: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record for `entity_id`, creating an empty one if needed
    pub fn find_or_create(
        &mut self,
        entity_id: u32,
        entry_cost: f64,
    ) -> Result<&mut RaceRecord, StoreError> {
        if self.finalized {
            return Err(StoreError::Finalized);
        }

        let idx = match self.positions.get(&entity_id).copied() {
            Some(idx) => idx,
            None => {
                self.records.push(RaceRecord::new(entity_id, entry_cost));
                let idx = self.records.len() - 1;
                self.positions.insert(entity_id, idx);
                idx
            }
        };

        Ok(&mut self.records[idx])
    }

    /// Append a finish time to an existing record
    pub fn append_finish_time(&mut self, entity_id: u32, time: f64) -> Result<(), StoreError> {
        if self.finalized {
            return Err(StoreError::Finalized);
        }

        let idx = *self
            .positions
            .get(&entity_id)
            .ok_or(StoreError::NotFound(entity_id))?;
        self.records[idx].finish_times.push(time);
        Ok(())
    }

    /// Sort finish times and build the rank table.
    ///
    /// Only the first call does any work.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }

        for record in &mut self.records {
            record.finish_times.sort_by(|a, b| a.total_cmp(b));
        }

        let mut ranked: Vec<usize> = (0..self.records.len()).collect();
        ranked.sort_by_key(|&idx| self.records[idx].entity_id);
        self.ranked = ranked;
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Look up a record by its 1-based rank in entity-id order
    pub fn lookup_by_rank(&self, rank: usize) -> Result<&RaceRecord, StoreError> {
        if !self.finalized {
            return Err(StoreError::NotFinalized);
        }

        rank.checked_sub(1)
            .and_then(|i| self.ranked.get(i))
            .map(|&idx| &self.records[idx])
            .ok_or(StoreError::RankNotFound {
                rank,
                len: self.ranked.len(),
            })
    }

    /// Iterate over `(rank, record)` in rank order. Empty before finalize.
    pub fn iter_ranked(&self) -> impl Iterator<Item = (usize, &RaceRecord)> {
        self.ranked
            .iter()
            .enumerate()
            .map(|(i, &idx)| (i + 1, &self.records[idx]))
    }

    /// Number of horses
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of finish times across all horses
    pub fn total_races(&self) -> usize {
        self.records.iter().map(|r| r.finish_times.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        for (id, cost, time) in [
            (42, 500.0, 61.2),
            (7, 250.0, 58.9),
            (42, 900.0, 59.5),
            (19, 0.0, 63.0),
            (7, 250.0, 57.1),
        ] {
            store.find_or_create(id, cost).unwrap();
            store.append_finish_time(id, time).unwrap();
        }
        store
    }

    #[test]
    fn test_find_or_create_keeps_first_entry_cost() {
        let mut store = RecordStore::new();
        store.find_or_create(3, 100.0).unwrap();
        let record = store.find_or_create(3, 999.0).unwrap();

        assert_eq!(record.entity_id, 3);
        assert_eq!(record.entry_cost, 100.0);
        assert!(record.finish_times.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_unknown_entity() {
        let mut store = RecordStore::new();
        let err = store.append_finish_time(5, 60.0).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(5)));
    }

    #[test]
    fn test_finalize_sorts_and_ranks() {
        let mut store = sample_store();
        store.finalize();

        let first = store.lookup_by_rank(1).unwrap();
        assert_eq!(first.entity_id, 7);
        assert_eq!(first.finish_times, vec![57.1, 58.9]);

        let second = store.lookup_by_rank(2).unwrap();
        assert_eq!(second.entity_id, 19);

        let third = store.lookup_by_rank(3).unwrap();
        assert_eq!(third.entity_id, 42);
        assert_eq!(third.finish_times, vec![59.5, 61.2]);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut store = sample_store();
        store.finalize();
        let before: Vec<RaceRecord> = store.iter_ranked().map(|(_, r)| r.clone()).collect();

        store.finalize();
        let after: Vec<RaceRecord> = store.iter_ranked().map(|(_, r)| r.clone()).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn test_lookup_rank_out_of_range() {
        let mut store = sample_store();
        store.finalize();

        assert!(matches!(
            store.lookup_by_rank(0),
            Err(StoreError::RankNotFound { rank: 0, len: 3 })
        ));
        assert!(matches!(
            store.lookup_by_rank(4),
            Err(StoreError::RankNotFound { rank: 4, len: 3 })
        ));
    }

    #[test]
    fn test_lookup_before_finalize() {
        let store = sample_store();
        assert!(matches!(
            store.lookup_by_rank(1),
            Err(StoreError::NotFinalized)
        ));
    }

    #[test]
    fn test_mutation_after_finalize_rejected() {
        let mut store = sample_store();
        store.finalize();

        assert!(matches!(
            store.append_finish_time(7, 50.0),
            Err(StoreError::Finalized)
        ));
        assert!(matches!(
            store.find_or_create(100, 1.0),
            Err(StoreError::Finalized)
        ));
        assert_eq!(store.total_races(), 5);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_iter_ranked_order() {
        let mut store = sample_store();
        store.finalize();

        let ids: Vec<(usize, u32)> = store
            .iter_ranked()
            .map(|(rank, r)| (rank, r.entity_id))
            .collect();
        assert_eq!(ids, vec![(1, 7), (2, 19), (3, 42)]);
    }
}

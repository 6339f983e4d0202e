//! In-memory record store.
//!
//! [`RecordStore`] holds the authoritative, ordered collection of records for
//! the session. Insertion order is the canonical order. Lookups by id go
//! through a side index so `update_by_id` does not scan the whole collection.
//!
//! Every successful mutation bumps [`RecordStore::revision`]; projections
//! memoized against an older revision are stale. Revisions only order the
//! states of one store, so each instance (clones included) also carries a
//! process-unique [`RecordStore::generation`].

use crate::domain::error::{GridError, Result};
use crate::domain::record::{Record, RecordId, RecordPatch};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Ordered collection of records with unique ids.
///
/// # Examples
///
/// ```
/// use catalog_grid::domain::{Record, RecordId, RecordPatch};
/// use catalog_grid::storage::RecordStore;
///
/// let mut store = RecordStore::new();
/// store.insert(Record::new(1, "Phone", 10.0, "smartphones", "Apple"))?;
///
/// let patch = RecordPatch { price: Some(8.0), ..RecordPatch::default() };
/// store.update_by_id(RecordId(1), &patch)?;
/// assert_eq!(store.get(RecordId(1)).map(|r| r.price), Some(8.0));
/// # Ok::<(), catalog_grid::GridError>(())
/// ```
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    index: HashMap<RecordId, usize>,
    generation: u64,
    revision: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            generation: next_generation(),
            revision: 0,
        }
    }
}

impl Clone for RecordStore {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            index: self.index.clone(),
            generation: next_generation(),
            revision: self.revision,
        }
    }
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire collection, keeping the input order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateKey`] if two input records share an id.
    /// The store is left unchanged in that case.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        let _span = tracing::debug_span!("store_replace_all", count = records.len()).entered();

        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id, position).is_some() {
                tracing::warn!(id = %record.id, "rejecting collection with duplicate id");
                return Err(GridError::DuplicateKey(record.id));
            }
        }

        self.records = records;
        self.index = index;
        self.bump();

        tracing::debug!(count = self.records.len(), "collection replaced");
        Ok(())
    }

    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateKey`] if the id is already present. The
    /// existing record is never overwritten.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        let _span = tracing::debug_span!("store_insert", id = %record.id).entered();

        if self.index.contains_key(&record.id) {
            tracing::debug!("duplicate id, insert rejected");
            return Err(GridError::DuplicateKey(record.id));
        }

        self.index.insert(record.id, self.records.len());
        self.records.push(record);
        self.bump();

        tracing::debug!(count = self.records.len(), "record inserted");
        Ok(())
    }

    /// Merges `patch` into the record with id `id` and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RecordNotFound`] if no record has that id.
    pub fn update_by_id(&mut self, id: RecordId, patch: &RecordPatch) -> Result<&Record> {
        let _span = tracing::debug_span!("store_update_by_id", id = %id).entered();

        let position = *self.index.get(&id).ok_or_else(|| {
            tracing::debug!("record not found");
            GridError::RecordNotFound(id)
        })?;

        patch.apply_to(&mut self.records[position]);
        self.bump();

        tracing::debug!("record updated");
        Ok(&self.records[position])
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.index.contains_key(&id)
    }

    /// Records in canonical (insertion) order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic counter bumped by every successful mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Identity of this store instance, distinct for every store and clone
    /// created in the process.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(id: u64, title: &str) -> Record {
        Record::new(id, title, 10.0, "smartphones", "Apple")
    }

    #[test]
    fn replace_all_keeps_input_order() {
        let mut store = RecordStore::new();
        store
            .replace_all(vec![phone(3, "C"), phone(1, "A"), phone(2, "B")])
            .unwrap();

        let ids: Vec<u64> = store.records().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.get(RecordId(1)).map(|r| r.title.as_str()), Some("A"));
    }

    #[test]
    fn replace_all_with_duplicates_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        store.replace_all(vec![phone(1, "A")]).unwrap();
        let revision = store.revision();

        let err = store
            .replace_all(vec![phone(2, "B"), phone(2, "B again")])
            .unwrap_err();

        assert!(matches!(err, GridError::DuplicateKey(RecordId(2))));
        assert_eq!(store.records(), &[phone(1, "A")]);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn insert_then_update_yields_single_merged_record() {
        let mut store = RecordStore::new();
        store.insert(phone(5, "Old")).unwrap();

        let patch = RecordPatch {
            title: Some("New".to_string()),
            brand: Some("Samsung".to_string()),
            ..RecordPatch::default()
        };
        let updated = store.update_by_id(RecordId(5), &patch).unwrap().clone();

        assert_eq!(store.len(), 1);
        assert_eq!(updated, Record::new(5, "New", 10.0, "smartphones", "Samsung"));
        assert_eq!(store.get(RecordId(5)), Some(&updated));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut store = RecordStore::new();
        store.insert(phone(1, "First")).unwrap();
        let revision = store.revision();

        let err = store.insert(phone(1, "Second")).unwrap_err();

        assert!(matches!(err, GridError::DuplicateKey(RecordId(1))));
        assert_eq!(store.records(), &[phone(1, "First")]);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn update_missing_id_reports_not_found() {
        let mut store = RecordStore::new();
        store.insert(phone(1, "A")).unwrap();
        let revision = store.revision();

        let err = store
            .update_by_id(RecordId(99), &RecordPatch::default())
            .unwrap_err();

        assert!(matches!(err, GridError::RecordNotFound(RecordId(99))));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut store = RecordStore::new();
        assert_eq!(store.revision(), 0);
        store.replace_all(vec![phone(1, "A")]).unwrap();
        store.insert(phone(2, "B")).unwrap();
        store
            .update_by_id(RecordId(2), &RecordPatch::default())
            .unwrap();
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn every_instance_has_its_own_generation() {
        let first = RecordStore::new();
        let second = RecordStore::default();
        let copy = first.clone();

        assert_ne!(first.generation(), second.generation());
        assert_ne!(first.generation(), copy.generation());
        assert_eq!(first.revision(), copy.revision());
    }
}

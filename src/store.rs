//! In-memory record store
//!
//! The single source of truth for a running session: an insertion-ordered
//! list of records. It is appended to by the Add form and replaced
//! wholesale by a successful pull. Nothing here persists; the remote
//! document is the only durable copy.

use std::collections::HashMap;
use std::hash::Hash;

use crate::record::Record;

/// Ordered collection of records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    records: Vec<Record>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Add a record at the end
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replace the entire contents (result of a successful pull)
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// All records in insertion order.
    ///
    /// The iterator is `Clone`, so a renderer can walk it more than once.
    pub fn all(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records matching `predicate`, in insertion order
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a Record> + 'a
    where
        P: FnMut(&Record) -> bool + 'a,
    {
        self.records.iter().filter(move |record| predicate(*record))
    }

    /// Search by name or serial, case-insensitive substring.
    ///
    /// The term is matched as typed, whitespace included. Only the empty
    /// term matches every record.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Record> + 'a {
        let needle = term.to_lowercase();
        self.filter(move |record| record.matches_lowercase(&needle))
    }

    /// Count records per key, keys in first-seen order
    pub fn count_by<K, F>(&self, mut key: F) -> Tally<K>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&Record) -> K,
    {
        let mut tally = Tally::default();
        for record in &self.records {
            tally.bump(key(record));
        }
        tally
    }

    /// Copy of the current contents (what a push writes)
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Occurrence counts keyed by `K`, iterated in first-seen key order
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
    positions: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    fn bump(&mut self, key: K) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Count for one key (0 if never seen)
    pub fn get(&self, key: &K) -> usize {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// `(key, count)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Counts, parallel to [`Tally::keys`]
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

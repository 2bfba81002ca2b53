//! Long-term store: the durable end of the cache
//!
//! Receives records demoted out of the short-term tier. Importance here is
//! treated as already proven; nothing decays passively, and records leave
//! only under capacity pressure, which evicts the globally least-important
//! entry first (the same ordering criterion the short-term tier uses).

use crate::short_term::RankKey;
use crate::types::{MemoryId, MemoryRecord};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Keyed record store with least-important-first eviction
#[derive(Debug)]
pub struct LongTermStore {
    records: HashMap<MemoryId, MemoryRecord>,
    order: BinaryHeap<Reverse<RankKey>>,
    max_size: usize,
}

impl LongTermStore {
    pub fn new(max_size: usize) -> Self {
        Self {
            records: HashMap::new(),
            order: BinaryHeap::new(),
            max_size,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: MemoryId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: MemoryId) -> Option<&MemoryRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: MemoryId) -> Option<&mut MemoryRecord> {
        self.records.get_mut(&id)
    }

    /// Insert or overwrite by id, evicting the least-important resident if
    /// the store runs past capacity. Overwrites leave a stale ordering key
    /// behind; `evict_min` validates keys against the live record on pop.
    pub fn store(&mut self, record: MemoryRecord) {
        self.order.push(Reverse(RankKey::of(&record)));
        self.records.insert(record.id, record);

        while self.records.len() > self.max_size {
            if let Some(evicted) = self.evict_min() {
                tracing::debug!(id = %evicted.id, importance = evicted.importance,
                    "evicted least-important long-term record");
            } else {
                break;
            }
        }
    }

    fn evict_min(&mut self) -> Option<MemoryRecord> {
        while let Some(Reverse(key)) = self.order.pop() {
            let live = self
                .records
                .get(&key.id)
                .is_some_and(|record| record.importance == key.importance);
            if live {
                return self.records.remove(&key.id);
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.values()
    }

    /// Secondary lookup by category tag.
    pub fn iter_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a MemoryRecord> {
        self.records.values().filter(move |r| r.kind == kind)
    }

    /// Lookup primitive for the recall ranker.
    pub fn search<F>(&self, predicate: F) -> Vec<&MemoryRecord>
    where
        F: Fn(&MemoryRecord) -> bool,
    {
        self.records.values().filter(|r| predicate(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: u64, importance: f64, kind: &str) -> MemoryRecord {
        let now = Utc::now();
        MemoryRecord {
            id: MemoryId(id),
            content: format!("record {id}"),
            kind: kind.into(),
            created_at: now,
            last_accessed_at: now,
            importance,
            emotional_tag: None,
            associations: Vec::new(),
            access_count: 1,
            metadata: None,
        }
    }

    #[test]
    fn store_and_get_by_id() {
        let mut store = LongTermStore::new(10);
        store.store(record(1, 0.8, "fact"));
        assert!(store.contains(MemoryId(1)));
        assert_eq!(store.get(MemoryId(1)).unwrap().importance, 0.8);
        assert!(store.get(MemoryId(2)).is_none());
    }

    #[test]
    fn overwrite_by_id_keeps_single_entry() {
        let mut store = LongTermStore::new(10);
        store.store(record(1, 0.4, "fact"));
        store.store(record(1, 0.9, "fact"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(MemoryId(1)).unwrap().importance, 0.9);
    }

    #[test]
    fn capacity_pressure_evicts_least_important() {
        let mut store = LongTermStore::new(2);
        store.store(record(1, 0.9, "fact"));
        store.store(record(2, 0.2, "fact"));
        store.store(record(3, 0.7, "fact"));

        assert_eq!(store.len(), 2);
        assert!(!store.contains(MemoryId(2)));
        assert!(store.contains(MemoryId(1)));
        assert!(store.contains(MemoryId(3)));
    }

    #[test]
    fn stale_keys_from_overwrites_do_not_evict_live_records() {
        let mut store = LongTermStore::new(2);
        store.store(record(1, 0.1, "fact"));
        store.store(record(1, 0.9, "fact"));
        store.store(record(2, 0.5, "fact"));
        store.store(record(3, 0.6, "fact"));

        // The 0.1 key for id 1 is stale; the live 0.9 entry must survive.
        assert!(store.contains(MemoryId(1)));
        assert!(!store.contains(MemoryId(2)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn kind_lookup_filters_records() {
        let mut store = LongTermStore::new(10);
        store.store(record(1, 0.5, "dialogue"));
        store.store(record(2, 0.5, "observation"));
        store.store(record(3, 0.5, "dialogue"));

        let dialogue: Vec<_> = store.iter_kind("dialogue").map(|r| r.id).collect();
        assert_eq!(dialogue.len(), 2);
        assert!(dialogue.contains(&MemoryId(1)));
        assert!(dialogue.contains(&MemoryId(3)));
    }

    #[test]
    fn search_applies_predicate() {
        let mut store = LongTermStore::new(10);
        store.store(record(1, 0.9, "fact"));
        store.store(record(2, 0.3, "fact"));

        let important = store.search(|r| r.importance > 0.5);
        assert_eq!(important.len(), 1);
        assert_eq!(important[0].id, MemoryId(1));
    }
}

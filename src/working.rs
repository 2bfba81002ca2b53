//! Working memory: a sliding window over the most recent admissions
//!
//! Pure FIFO over record ids, independent of importance. Guarantees the
//! immediately preceding turns of an interaction stay recallable cheaply
//! even when their importance scores would never keep them in the
//! short-term tier.

use crate::types::MemoryId;
use std::collections::VecDeque;

/// Fixed-capacity FIFO window of record ids
#[derive(Debug)]
pub struct WorkingMemory {
    window: VecDeque<MemoryId>,
    max_items: usize,
}

impl WorkingMemory {
    pub fn new(max_items: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(max_items),
            max_items,
        }
    }

    /// Append an id, evicting the oldest when the window is full.
    pub fn push(&mut self, id: MemoryId) {
        if self.window.len() == self.max_items {
            self.window.pop_front();
        }
        self.window.push_back(id);
    }

    /// Window contents, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = MemoryId> + '_ {
        self.window.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_insertion_order() {
        let mut wm = WorkingMemory::new(3);
        wm.push(MemoryId(1));
        wm.push(MemoryId(2));
        let ids: Vec<_> = wm.iter().collect();
        assert_eq!(ids, vec![MemoryId(1), MemoryId(2)]);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut wm = WorkingMemory::new(2);
        wm.push(MemoryId(1));
        wm.push(MemoryId(2));
        wm.push(MemoryId(3));

        let ids: Vec<_> = wm.iter().collect();
        assert_eq!(ids, vec![MemoryId(2), MemoryId(3)]);
        assert_eq!(wm.len(), 2);
    }
}

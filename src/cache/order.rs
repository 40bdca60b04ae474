//! Insertion Order Module
//!
//! Tracks the order in which keys were inserted, for capacity eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks insertion order for oldest-first eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently inserted
/// - Back = Least recently inserted
///
/// Reads never reorder keys; only inserts do.
#[derive(Debug)]
pub struct InsertionOrder<K> {
    order: VecDeque<K>,
}

impl<K: PartialEq> InsertionOrder<K> {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Marks a key that is not yet tracked as the newest insertion.
    pub fn record(&mut self, key: K) {
        self.order.push_front(key);
    }

    // == Refresh ==
    /// Moves an already tracked key to the newest slot.
    pub fn refresh(&mut self, key: K) {
        self.remove(&key);
        self.order.push_front(key);
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and removes the least recently inserted key.
    pub fn pop_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: PartialEq> Default for InsertionOrder<K> {
    fn default() -> Self {
        Self::new()
    }
}

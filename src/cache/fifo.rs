//! Insertion Queue Module
//!
//! Tracks the order in which keys were first inserted, for FIFO eviction.

use std::collections::VecDeque;

// == Insertion Queue ==
/// Keys tagged with their insertion sequence number, oldest first.
///
/// - Front = oldest insertion (next to evict)
/// - Back = newest insertion
///
/// Reads never reorder the queue, and overwriting a key that is already
/// tracked leaves it where it is.
#[derive(Debug, Default)]
pub struct InsertionQueue {
    order: VecDeque<(u64, String)>,
}

impl InsertionQueue {
    // == Constructor ==
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Appends a newly inserted key at the newest position.
    ///
    /// Sequence numbers must increase with every push.
    pub fn push(&mut self, insertion_order: u64, key: &str) {
        self.order.push_back((insertion_order, key.to_string()));
    }

    // == Evict Oldest ==
    /// Returns and removes the earliest-inserted key with its sequence number.
    ///
    /// Returns None if the queue is empty.
    pub fn evict_oldest(&mut self) -> Option<(u64, String)> {
        self.order.pop_front()
    }
}

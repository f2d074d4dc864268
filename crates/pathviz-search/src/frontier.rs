//! The search frontier: a min-queue keyed by `(priority, insertion order)`.
//!
//! Entries are stored in a min-heap; lower priorities are popped first and
//! ties are broken by insertion order (FIFO), so a run over identical
//! input replays identically.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An entry in the frontier.
#[derive(Debug, Clone, Copy)]
struct Entry {
    idx: usize,
    priority: i32,
    /// Monotonically increasing counter stamped on push.
    /// Lower = inserted earlier = popped first among equal priorities.
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap, so this is the "natural"
        // comparison: smaller priority first, then smaller seq. The cell
        // payload never participates in ordering.
        self.priority
            .cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A min-queue of cell indices ordered by `(priority, insertion order)`.
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push a cell index at the given priority.
    pub fn push(&mut self, idx: usize, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { idx, priority, seq }));
    }

    /// Pop the index with the lowest priority (ties broken FIFO).
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse(entry)| entry.idx)
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries in the frontier.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_priority() {
        let mut f = Frontier::new();
        f.push(10, 3);
        f.push(11, 1);
        f.push(12, 2);

        assert_eq!(f.pop(), Some(11));
        assert_eq!(f.pop(), Some(12));
        assert_eq!(f.pop(), Some(10));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn test_fifo_same_priority() {
        let mut f = Frontier::new();
        f.push(7, 1);
        f.push(5, 1);
        f.push(9, 1);

        assert_eq!(f.pop(), Some(7));
        assert_eq!(f.pop(), Some(5));
        assert_eq!(f.pop(), Some(9));
    }

    #[test]
    fn test_payload_does_not_order() {
        // A large index pushed early still comes out before a small index
        // pushed later at the same priority.
        let mut f = Frontier::new();
        f.push(usize::MAX - 1, 4);
        f.push(0, 4);

        assert_eq!(f.pop(), Some(usize::MAX - 1));
        assert_eq!(f.pop(), Some(0));
    }

    #[test]
    fn test_is_empty_and_len() {
        let mut f = Frontier::new();
        assert!(f.is_empty());
        assert_eq!(f.len(), 0);

        f.push(1, 1);
        assert!(!f.is_empty());
        assert_eq!(f.len(), 1);

        f.pop();
        assert!(f.is_empty());
    }
}

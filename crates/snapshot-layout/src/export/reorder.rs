//! Restoring input order for captures that complete out of order

use std::collections::BTreeMap;

/// Holds items keyed by input index and releases them strictly in order.
#[derive(Debug)]
pub struct ReorderBuffer<T> {
    next: usize,
    pending: BTreeMap<usize, T>,
}

impl<T> Default for ReorderBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReorderBuffer<T> {
    pub fn new() -> Self {
        Self {
            next: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Index of the next item to be released
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Number of items waiting for an earlier index
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Store an item. Indices already released, or already pending, are
    /// rejected and handed back.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), T> {
        if index < self.next || self.pending.contains_key(&index) {
            return Err(item);
        }
        self.pending.insert(index, item);
        Ok(())
    }

    /// Release the next item if it has arrived
    pub fn pop_ready(&mut self) -> Option<(usize, T)> {
        let item = self.pending.remove(&self.next)?;
        let index = self.next;
        self.next += 1;
        Some((index, item))
    }

    /// Release every item that is now contiguous with the released prefix
    pub fn drain_ready(&mut self) -> Vec<(usize, T)> {
        std::iter::from_fn(|| self.pop_ready()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_passes_through() {
        let mut buffer = ReorderBuffer::new();
        buffer.insert(0, "a").unwrap();
        assert_eq!(buffer.drain_ready(), vec![(0, "a")]);
        buffer.insert(1, "b").unwrap();
        assert_eq!(buffer.drain_ready(), vec![(1, "b")]);
    }

    #[test]
    fn test_out_of_order_is_held_back() {
        let mut buffer = ReorderBuffer::new();
        buffer.insert(2, "c").unwrap();
        buffer.insert(1, "b").unwrap();
        assert!(buffer.drain_ready().is_empty());
        assert_eq!(buffer.pending(), 2);

        buffer.insert(0, "a").unwrap();
        assert_eq!(buffer.drain_ready(), vec![(0, "a"), (1, "b"), (2, "c")]);
        assert_eq!(buffer.next_index(), 3);
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut buffer = ReorderBuffer::new();
        buffer.insert(1, "b").unwrap();
        assert_eq!(buffer.insert(1, "again"), Err("again"));
        buffer.insert(0, "a").unwrap();
        buffer.drain_ready();
        assert_eq!(buffer.insert(0, "late"), Err("late"));
    }
}

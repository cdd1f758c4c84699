//! Bounded, newest-first history lists.
//!
//! Every widget keeps a short trail of what the user did: the calculator its
//! finished expressions, the converter its recent conversions and the color
//! tool its saved colors. They differ only in capacity and in how duplicates
//! are treated.

/// How a list treats an entry equal to one it already holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dedup {
    /// Every push is recorded.
    Never,
    /// A push equal to the current head is dropped; older copies don't count.
    AgainstHead,
    /// A push equal to any stored entry is dropped.
    Anywhere,
}

/// A newest-first list that never grows past its capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedHistory<T> {
    entries: Vec<T>,
    capacity: usize,
    dedup: Dedup,
}

impl<T: PartialEq> BoundedHistory<T> {
    pub fn new(capacity: usize, dedup: Dedup) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            dedup,
        }
    }

    /// Put `entry` at the front, evicting the oldest entry when full.
    ///
    /// Returns `false` if the dedup policy rejected the entry.
    pub fn push(&mut self, entry: T) -> bool {
        let duplicate = match self.dedup {
            Dedup::Never => false,
            Dedup::AgainstHead => self.entries.first() == Some(&entry),
            Dedup::Anywhere => self.entries.contains(&entry),
        };
        if duplicate || self.capacity == 0 {
            return false;
        }

        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        true
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_capped() {
        let mut history = BoundedHistory::new(3, Dedup::Never);
        for i in 0..10 {
            assert!(history.push(i));
        }
        assert_eq!(history.as_slice(), &[9, 8, 7]);
        assert_eq!(history.latest(), Some(&9));
    }

    #[test]
    fn test_head_dedup_only_checks_head() {
        let mut history = BoundedHistory::new(5, Dedup::AgainstHead);
        assert!(history.push("a"));
        assert!(!history.push("a"));
        assert!(history.push("b"));
        // Same value again, but not consecutively
        assert!(history.push("a"));
        assert_eq!(history.as_slice(), &["a", "b", "a"]);
    }

    #[test]
    fn test_anywhere_dedup() {
        let mut history = BoundedHistory::new(10, Dedup::Anywhere);
        assert!(history.push("#ff0000"));
        assert!(history.push("#00ff00"));
        assert!(!history.push("#ff0000"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut history = BoundedHistory::new(0, Dedup::Never);
        assert!(!history.push(1));
        assert!(history.is_empty());
    }
}

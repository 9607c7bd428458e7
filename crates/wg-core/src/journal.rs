//! Journal storage and export.

use std::collections::VecDeque;

/// Default number of entries kept before the oldest are evicted.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 50;

/// A bounded, chronological log of applied effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journal {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl Journal {
    /// Create an empty journal with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty journal holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting the oldest ones past capacity.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        self.evict();
    }

    /// Replace all entries, keeping only the most recent ones that fit.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = String>) {
        self.entries = entries.into_iter().collect();
        self.evict();
    }

    /// Change the capacity, trimming immediately.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.evict();
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    /// Copy of the entries, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Journal\n\n");
        for entry in &self.entries {
            out.push_str(&format!("- {entry}\n"));
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Journal\n=======\n\n");
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("{:>3}. {entry}\n", i + 1));
        }
        out
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.capacity(), DEFAULT_JOURNAL_CAPACITY);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut j = Journal::with_capacity(2);
        j.append("one");
        j.append("two");
        j.append("three");
        assert_eq!(j.entries().collect::<Vec<_>>(), ["two", "three"]);
    }

    #[test]
    fn shrinking_capacity_trims() {
        let mut j = Journal::with_capacity(5);
        for i in 0..5 {
            j.append(format!("entry {i}"));
        }
        j.set_capacity(2);
        assert_eq!(j.to_vec(), ["entry 3", "entry 4"]);
    }

    #[test]
    fn zero_capacity_clamped() {
        let mut j = Journal::with_capacity(0);
        j.append("a");
        j.append("b");
        assert_eq!(j.to_vec(), ["b"]);
    }

    #[test]
    fn export_markdown_lists_entries() {
        let mut j = Journal::new();
        j.append("Open the door → Stats: luck +1");
        let md = j.export_markdown();
        assert!(md.starts_with("# Journal"));
        assert!(md.contains("- Open the door → Stats: luck +1"));
    }

    #[test]
    fn export_text_numbers_entries() {
        let mut j = Journal::new();
        j.append("first");
        j.append("second");
        let txt = j.export_text();
        assert!(txt.contains("  1. first"));
        assert!(txt.contains("  2. second"));
    }

    proptest! {
        #[test]
        fn keeps_most_recent_in_order(capacity in 1usize..10, count in 0usize..30) {
            let mut j = Journal::with_capacity(capacity);
            for i in 0..count {
                j.append(i.to_string());
            }
            let expected: Vec<String> =
                (count.saturating_sub(capacity)..count).map(|i| i.to_string()).collect();
            prop_assert!(j.len() <= capacity);
            prop_assert_eq!(j.to_vec(), expected);
        }
    }
}

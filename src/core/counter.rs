//! Insertion-ordered frequency counting.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts keys while remembering when each key was first seen.
///
/// [`most_common`](Self::most_common) sorts by descending count; keys with
/// equal counts keep first-occurrence order.
#[derive(Debug, Clone)]
pub(crate) struct OrderedCounter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> OrderedCounter<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 += 1;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, 1));
        }
    }

    /// Returns up to `limit` entries (all when `None`), most frequent first.
    pub(crate) fn most_common(self, limit: Option<usize>) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        // stable: equal counts stay in first-occurrence order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = limit {
            entries.truncate(n);
        }
        entries
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for OrderedCounter<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

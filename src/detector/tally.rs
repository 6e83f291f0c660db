//! Per-source deauthentication counts for the current detection cycle.

use crate::detection::TopSource;
use std::collections::HashMap;

/// Counts deauth frames per source since the last reset.
///
/// Entries keep first-seen order, which is the tie-break for [`top`]: among
/// sources with equal counts the one seen first in the cycle ranks first.
///
/// [`top`]: AttackerTally::top
#[derive(Debug, Default, Clone)]
pub struct AttackerTally {
    /// Position of each source in `entries`
    index: HashMap<String, usize>,
    /// (source, count) in first-seen order
    entries: Vec<(String, u64)>,
}

impl AttackerTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `source_id`, inserting it at 1 if absent.
    pub fn record(&mut self, source_id: &str) {
        match self.index.get(source_id) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(source_id.to_string(), self.entries.len());
                self.entries.push((source_id.to_string(), 1));
            }
        }
    }

    /// Count attributed to `source_id` in this cycle.
    pub fn count_for(&self, source_id: &str) -> u64 {
        self.index
            .get(source_id)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Up to `n` sources, descending by count, ties in first-seen order.
    pub fn top(&self, n: usize) -> Vec<TopSource> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(source, count)| TopSource::new(source.clone(), *count))
            .collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries.
    pub fn reset(&mut self) {
        self.index.clear();
        self.entries.clear();
    }
}

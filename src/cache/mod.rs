//! Classification cache
//!
//! Parsed fragment groups keyed by the exact `(revision, range)` of the
//! query. Everything is dropped on a revision change; the engine also
//! drops it on configuration changes and oracle reclassification.

use std::collections::HashMap;

use crate::matchers::FragmentGroup;
use crate::text::{Revision, TextRange};

#[derive(Debug, Default)]
pub struct ClassificationCache {
    revision: Option<Revision>,
    entries: HashMap<TextRange, Vec<FragmentGroup>>,
    hits: u64,
    misses: u64,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, revision: Revision, range: TextRange) -> Option<&[FragmentGroup]> {
        if self.revision != Some(revision) {
            self.misses += 1;
            return None;
        }
        match self.entries.get(&range) {
            Some(groups) => {
                self.hits += 1;
                Some(groups.as_slice())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, revision: Revision, range: TextRange, groups: Vec<FragmentGroup>) {
        if self.revision != Some(revision) {
            self.entries.clear();
            self.revision = Some(revision);
        }
        self.entries.insert(range, groups);
    }

    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(entries = self.entries.len(), "invalidating classification cache");
        }
        self.entries.clear();
        self.revision = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Classification;
    use crate::matchers::Fragment;

    fn groups() -> Vec<FragmentGroup> {
        vec![FragmentGroup::new(vec![Fragment::new(3, 6, Classification::Command)])]
    }

    #[test]
    fn test_exact_key() {
        let mut cache = ClassificationCache::new();
        cache.put(1, TextRange::new(0, 10), groups());
        assert_eq!(cache.get(1, TextRange::new(0, 10)).map(|g| g.len()), Some(1));
        assert!(cache.get(1, TextRange::new(0, 9)).is_none());
        assert!(cache.get(2, TextRange::new(0, 10)).is_none());
        assert_eq!(cache.stats(), (1, 2));
    }

    #[test]
    fn test_new_revision_drops_old_entries() {
        let mut cache = ClassificationCache::new();
        cache.put(1, TextRange::new(0, 10), groups());
        cache.put(2, TextRange::new(5, 10), groups());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(1, TextRange::new(0, 10)).is_none());
    }

    #[test]
    fn test_invalidate() {
        let mut cache = ClassificationCache::new();
        cache.put(1, TextRange::new(0, 10), groups());
        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.get(1, TextRange::new(0, 10)).is_none());
    }
}

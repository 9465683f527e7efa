//! Bounded per-extractor line memoization.

use moka::sync::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use tack_common::Candidate;

/// Candidates found on one line, shared between the cache and callers.
pub type LineMatches = Arc<[Candidate]>;

/// One bounded line cache per extractor, keyed by
/// [`ContentHandler::extractor_key`](crate::ContentHandler::extractor_key).
///
/// Lines are stored trimmed, with the continue sentinel already removed and
/// duplicates collapsed.
pub struct LineCaches {
    capacity: u64,
    caches: HashMap<String, Cache<String, LineMatches>>,
}

impl LineCaches {
    /// Creates an empty set of caches, each holding at most `capacity` lines.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            caches: HashMap::new(),
        }
    }

    /// Returns the cache for an extractor, creating it on first use.
    pub fn for_extractor(&mut self, key: &str) -> &Cache<String, LineMatches> {
        let capacity = self.capacity;
        self.caches
            .entry(key.to_string())
            .or_insert_with(|| Cache::new(capacity))
    }
}

impl Default for LineCaches {
    fn default() -> Self {
        Self::new(tack_config::DEFAULT_LINE_CACHE_CAPACITY)
    }
}

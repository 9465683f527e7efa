//! Content-hash change detection for file-backed content.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tack_common::ContentHash;

/// Remembers the content hash of every file scanned in a session so that
/// rescans skip files whose text has not changed.
///
/// Held in memory only.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    hashes: HashMap<PathBuf, ContentHash>,
}

impl ChangeTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hash of `content` if `path` is new or its content
    /// differs from the last recorded hash, `None` if it is unchanged.
    ///
    /// Nothing is recorded until [`record`](Self::record) is called, so a
    /// scan that fails can be retried without losing changes.
    pub fn check(&self, path: &Path, content: &str) -> Option<ContentHash> {
        let hash = ContentHash::of_text(content);
        match self.hashes.get(path) {
            Some(previous) if *previous == hash => None,
            _ => Some(hash),
        }
    }

    /// Records the hash last scanned for `path`.
    pub fn record(&mut self, path: PathBuf, hash: ContentHash) {
        self.hashes.insert(path, hash);
    }

    /// Returns the number of tracked files.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Returns `true` if no file has been observed.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_new_and_modified() {
        let mut tracker = ChangeTracker::new();
        let path = Path::new("src/index.html");
        let first = tracker.check(path, "<div class=\"p-4\">").unwrap();
        // Unrecorded checks keep reporting a change.
        assert!(tracker.check(path, "<div class=\"p-4\">").is_some());
        tracker.record(path.to_path_buf(), first);
        assert!(tracker.check(path, "<div class=\"p-4\">").is_none());
        assert!(tracker.check(path, "<div class=\"p-8\">").is_some());
        assert_eq!(tracker.len(), 1);
    }
}

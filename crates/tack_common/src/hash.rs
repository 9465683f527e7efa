//! Content hashing for change detection between incremental builds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 hash of a content file's bytes.
///
/// The extractor session remembers one hash per scanned file so an
/// incremental rebuild only re-reads files whose hash moved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a content hash of UTF-8 text.
    pub fn of_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::of_text("<div class=\"p-4\">");
        let b = ContentHash::from_bytes(b"<div class=\"p-4\">");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(ContentHash::of_text("p-4"), ContentHash::of_text("p-2"));
    }

    #[test]
    fn display_is_hex() {
        let s = ContentHash::of_text("test").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

//! Opaque identifier for stylesheets registered in a [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Identifies one stylesheet (input file or generated fragment source).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// File id for text that has no backing source, such as CSS bodies
    /// written in the configuration file.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        assert_eq!(FileId::from_raw(42).as_raw(), 42);
    }

    #[test]
    fn dummy_differs_from_normal() {
        assert_ne!(FileId::DUMMY, FileId::from_raw(0));
    }
}

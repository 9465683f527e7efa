//! Byte-offset ranges within stylesheets.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte range within a stylesheet; `start` inclusive, `end` exclusive.
///
/// The parser attaches a span to every rule, declaration and comment. Nodes
/// synthesized from configuration carry no span until the merge step
/// back-fills the span of the directive they replace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The stylesheet this span belongs to.
    pub file: FileId,
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// A span used when no source location is available.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span in the given file with the given byte range.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Creates a span from `usize` offsets, as produced by the tokenizer.
    pub fn from_range(file: FileId, start: usize, end: usize) -> Self {
        Self::new(file, start as u32, end as u32)
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is the dummy span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

//! A registered stylesheet with line-start indexing.

use crate::file_id::FileId;
use std::path::PathBuf;

/// A stylesheet loaded into the compilation session.
///
/// Content is stored with `\r\n` already normalized to `\n`, so byte offsets
/// produced by the tokenizer index directly into [`content`](Self::content).
pub struct SourceFile {
    /// The identifier of this file within the [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// Filesystem path, or a synthetic name such as `<stdin>`.
    pub path: PathBuf,
    /// Normalized text content.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile`, normalizing line endings.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let content = normalize_newlines(content);
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns a substring of the file content between byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// Returns the full line containing the given byte offset, without the
    /// trailing newline.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let offset = (byte_offset as usize).min(self.content.len());
        let start = self.content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
        let end = self.content[offset..]
            .find('\n')
            .map_or(self.content.len(), |pos| offset + pos);
        &self.content[start..end]
    }
}

/// Normalizes `\r\n` line endings to `\n`.
pub fn normalize_newlines(content: String) -> String {
    if content.contains("\r\n") {
        content.replace("\r\n", "\n")
    } else {
        content
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

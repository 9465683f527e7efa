//! Central database of all stylesheets in a compilation session.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// Owns every stylesheet's text and resolves spans to line/column positions.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Loads a stylesheet from the filesystem and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path.to_path_buf(), content))
    }

    /// Adds a stylesheet from an in-memory string.
    ///
    /// The `name` is used as the file path in diagnostics.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the [`SourceFile`] for the given [`FileId`].
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Returns the [`SourceFile`] for the given id, or `None` for ids not
    /// issued by this database (including [`FileId::DUMMY`]).
    pub fn try_get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Resolves a [`Span`] to line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the source text corresponding to a [`Span`].
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file).snippet(span.start, span.end)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_span() {
        let mut db = SourceDb::new();
        let id = db.add_source("input.css", "@tailwind base;\n@tailwind utilities;".to_string());
        let resolved = db.resolve_span(Span::new(id, 16, 36));
        assert_eq!(resolved.file_path, PathBuf::from("input.css"));
        assert_eq!((resolved.start_line, resolved.start_col), (2, 1));
        assert_eq!((resolved.end_line, resolved.end_col), (2, 20));
    }

    #[test]
    fn snippet() {
        let mut db = SourceDb::new();
        let id = db.add_source("input.css", ".a{color:red}".to_string());
        assert_eq!(db.snippet(Span::new(id, 3, 12)), "color:red");
    }

    #[test]
    fn dummy_is_not_found() {
        let db = SourceDb::new();
        assert!(db.try_get_file(FileId::DUMMY).is_none());
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.css");
        std::fs::write(&path, "@tailwind utilities;\r\n").unwrap();

        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).content, "@tailwind utilities;\n");
    }
}

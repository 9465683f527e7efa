//! Items of changed content fed to the scanner.

use std::path::{Path, PathBuf};

/// A unit of content whose candidates should be (re)extracted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangedContent {
    /// Text held in memory.
    Inline {
        /// The text to scan.
        content: String,
        /// Extension selecting the handler, without the dot.
        extension: String,
    },
    /// A file read during the scan.
    File {
        /// Path to the file.
        path: PathBuf,
        /// Extension selecting the handler, without the dot.
        extension: String,
    },
}

impl ChangedContent {
    /// Creates an inline item.
    pub fn inline(content: impl Into<String>, extension: impl Into<String>) -> Self {
        ChangedContent::Inline {
            content: content.into(),
            extension: extension.into(),
        }
    }

    /// Creates a file item, taking the extension from the path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        ChangedContent::File { path, extension }
    }

    /// Returns the extension selecting this item's handler.
    pub fn extension(&self) -> &str {
        match self {
            ChangedContent::Inline { extension, .. } | ChangedContent::File { extension, .. } => {
                extension
            }
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_extension_from_path() {
        let item = ChangedContent::file("src/App.svelte");
        assert_eq!(item.extension(), "svelte");
        assert_eq!(ChangedContent::file("Makefile").extension(), "");
    }

    #[test]
    fn inline_extension() {
        assert_eq!(ChangedContent::inline("<div>", "html").extension(), "html");
    }
}

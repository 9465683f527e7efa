//! Resolution of `[content]` patterns to concrete file paths.

use crate::error::ConfigError;
use crate::types::ContentConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expands the `[content]` file patterns relative to `root`.
///
/// Plain paths are returned as given even when they do not exist, so a
/// missing file surfaces later as an unreadable-content error. Glob patterns
/// expand to the regular files they match. The result keeps first-seen order
/// with duplicates removed.
pub fn resolve_content_files(
    content: &ContentConfig,
    root: &Path,
) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in &content.files {
        let full = root.join(pattern);
        if !is_glob(pattern) {
            if seen.insert(full.clone()) {
                files.push(full);
            }
            continue;
        }

        let full_str = full.to_string_lossy();
        let entries = glob::glob(&full_str).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.msg.to_string(),
        })?;
        for entry in entries {
            let path = entry.map_err(|e| ConfigError::IoError(e.into()))?;
            if path.is_dir() {
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

//! Scanning errors.

use std::path::PathBuf;
use tack_diagnostics::{Diagnostic, DiagnosticCode};
use tack_source::Span;

/// Errors that abort a content scan.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A content file could not be read.
    #[error("failed to read content file {}: {source}", path.display())]
    Unreadable {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Converts this error to a diagnostic. Content files are not registered
    /// as stylesheets, so the diagnostic has no source location.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExtractError::Unreadable { path, .. } => Diagnostic::error(
                DiagnosticCode::CONTENT_UNREADABLE,
                self.to_string(),
                Span::DUMMY,
            )
            .with_note(format!("listed in `[content]`: {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_diagnostic() {
        let err = ExtractError::Unreadable {
            path: PathBuf::from("src/missing.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read content file src/missing.html: not found"
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, DiagnosticCode::CONTENT_UNREADABLE);
        assert!(diag.primary_span.is_dummy());
    }
}

//! Structured diagnostic messages with severity, codes, labels, and fixes.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use crate::suggested_fix::SuggestedFix;
use serde::{Deserialize, Serialize};
use tack_source::Span;

/// A diagnostic pointing at a stylesheet location.
///
/// Carries the severity, a stable code, the primary span, and optional
/// labels, notes, help lines and an auto-applicable fix.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The stable code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Where the issue was detected; [`Span::DUMMY`] when there is no location.
    pub primary_span: Span,
    /// Additional annotated spans providing context.
    pub labels: Vec<Label>,
    /// Explanatory footnotes (`note: ...`).
    pub notes: Vec<String>,
    /// Actionable suggestions (`help: ...`).
    pub help: Vec<String>,
    /// An auto-applicable fix, if available.
    pub fix: Option<SuggestedFix>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
            fix: None,
        }
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Sets the suggested fix for this diagnostic.
    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.fix = Some(fix);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(
            DiagnosticCode::MISSING_OPENING_BRACE,
            "missing opening {",
            Span::DUMMY,
        );
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code.to_string(), "E102");
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(
            DiagnosticCode::NO_UTILITIES,
            "no utility classes were detected",
            Span::DUMMY,
        )
        .with_label(Label::primary(Span::DUMMY, "declared here"))
        .with_note("the content paths matched no class names")
        .with_help("check the `[content]` section of tack.toml");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
        assert!(diag.fix.is_none());
    }
}

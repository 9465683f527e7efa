//! Tokenizer errors.

use tack_diagnostics::{Diagnostic, DiagnosticCode, Label};
use tack_source::Span;

/// A fatal error found while tokenizing a stylesheet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A string literal hit a newline, or `;` followed by a newline, before
    /// its closing quote.
    #[error("unterminated string: {literal}")]
    UnterminatedString {
        /// The literal as written, with the missing quote appended.
        literal: String,
        /// Location of the literal.
        span: Span,
    },

    /// A `}` with no open block.
    #[error("missing opening {{")]
    MissingOpeningBrace {
        /// Location of the stray `}`.
        span: Span,
    },

    /// A block still open at end of input.
    #[error("missing closing }} at {selector}")]
    MissingClosingBrace {
        /// Selector of the innermost unclosed rule.
        selector: String,
        /// Location of the unclosed rule's head.
        span: Span,
    },
}

impl ParseError {
    /// Returns the offending byte range.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnterminatedString { span, .. }
            | ParseError::MissingOpeningBrace { span }
            | ParseError::MissingClosingBrace { span, .. } => *span,
        }
    }

    /// Converts this error to a located diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        match self {
            ParseError::UnterminatedString { .. } => {
                Diagnostic::error(DiagnosticCode::UNTERMINATED_STRING, self.to_string(), span)
                    .with_label(Label::primary(span, "string starts here"))
            }
            ParseError::MissingOpeningBrace { .. } => {
                Diagnostic::error(DiagnosticCode::MISSING_OPENING_BRACE, self.to_string(), span)
                    .with_label(Label::primary(span, "no block to close"))
            }
            ParseError::MissingClosingBrace { .. } => {
                Diagnostic::error(DiagnosticCode::MISSING_CLOSING_BRACE, self.to_string(), span)
                    .with_label(Label::primary(span, "block opened here"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tack_diagnostics::Severity;
    use tack_source::FileId;

    #[test]
    fn display_messages() {
        let span = Span::new(FileId::from_raw(0), 0, 1);
        assert_eq!(
            ParseError::MissingOpeningBrace { span }.to_string(),
            "missing opening {"
        );
        assert_eq!(
            ParseError::MissingClosingBrace {
                selector: ".a".into(),
                span
            }
            .to_string(),
            "missing closing } at .a"
        );
    }

    #[test]
    fn diagnostic_carries_code_and_span() {
        let span = Span::new(FileId::from_raw(0), 3, 9);
        let err = ParseError::UnterminatedString {
            literal: "\"oops}\"".into(),
            span,
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, DiagnosticCode::UNTERMINATED_STRING);
        assert_eq!(diag.primary_span, span);
        assert_eq!(diag.labels.len(), 1);
    }
}

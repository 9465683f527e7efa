//! Labels that annotate spans within a diagnostic.

use serde::{Deserialize, Serialize};
use tack_source::Span;

/// A span plus the message shown next to its underline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// The span this label annotates.
    pub span: Span,
    /// The message displayed next to the underline.
    pub message: String,
}

impl Label {
    /// Creates the label for a diagnostic's main location, underlined with
    /// `^` by the terminal renderer.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tack_source::FileId;

    #[test]
    fn primary_keeps_span_and_message() {
        let span = Span::new(FileId::from_raw(0), 4, 9);
        let label = Label::primary(span, "unclosed");
        assert_eq!(label.span, span);
        assert_eq!(label.message, "unclosed");
    }
}

//! Auto-applicable fix suggestions.

use serde::{Deserialize, Serialize};
use tack_source::Span;

/// Replace the text under `span` with `new_text`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Replacement {
    /// The span to replace.
    pub span: Span,
    /// The replacement text.
    pub new_text: String,
}

/// A fix made of one or more replacements, e.g. rewriting a deprecated
/// `@variants` at-rule to `@layer utilities`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestedFix {
    /// A description of what this fix does.
    pub message: String,
    /// The replacements that implement the fix.
    pub replacements: Vec<Replacement>,
}

impl SuggestedFix {
    /// Creates a fix consisting of a single replacement.
    pub fn replace(message: impl Into<String>, span: Span, new_text: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacements: vec![Replacement {
                span,
                new_text: new_text.into(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_replacement() {
        let fix = SuggestedFix::replace("use `@layer utilities`", Span::DUMMY, "@layer utilities");
        assert_eq!(fix.replacements.len(), 1);
        assert_eq!(fix.replacements[0].new_text, "@layer utilities");
    }
}

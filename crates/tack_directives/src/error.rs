//! Directive placement errors.

use tack_diagnostics::{Diagnostic, DiagnosticCode, Label};
use tack_source::Span;

/// A block that targets a layer the document never declares.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// `@layer base|components|utilities` without the matching `@tailwind`.
    #[error("`@layer {layer}` is used but no matching `@tailwind {layer}` directive is present.")]
    LayerWithoutDirective {
        /// The layer named by the `@layer` block.
        layer: String,
        /// Location of the `@layer` block.
        span: Span,
    },

    /// `@responsive` or `@variants` without `@tailwind utilities`.
    #[error("`@{name}` is used but `@tailwind utilities` is missing.")]
    LegacyWithoutUtilities {
        /// `responsive` or `variants`.
        name: String,
        /// Location of the at-rule.
        span: Span,
    },
}

impl DirectiveError {
    /// Returns the location of the offending at-rule.
    pub fn span(&self) -> Span {
        match self {
            DirectiveError::LayerWithoutDirective { span, .. }
            | DirectiveError::LegacyWithoutUtilities { span, .. } => *span,
        }
    }

    /// Converts this error to a located diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        match self {
            DirectiveError::LayerWithoutDirective { layer, .. } => Diagnostic::error(
                DiagnosticCode::LAYER_WITHOUT_DIRECTIVE,
                self.to_string(),
                span,
            )
            .with_label(Label::primary(span, "layer used here"))
            .with_help(format!("add `@tailwind {layer};` to the stylesheet")),
            DirectiveError::LegacyWithoutUtilities { .. } => Diagnostic::error(
                DiagnosticCode::LEGACY_WITHOUT_UTILITIES,
                self.to_string(),
                span,
            )
            .with_label(Label::primary(span, "used here"))
            .with_help("add `@tailwind utilities;` to the stylesheet"),
        }
    }
}

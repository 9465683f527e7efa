//! The pipeline's top-level error.

use tack_common::InternalError;
use tack_config::ConfigError;
use tack_css::ParseError;
use tack_diagnostics::{Diagnostic, DiagnosticCode};
use tack_directives::DirectiveError;
use tack_extract::ExtractError;
use tack_generate::ResolverError;
use tack_source::Span;
use thiserror::Error;

/// Any failure that aborts a compile.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The stylesheet does not tokenize.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A layer-targeting block has no matching `@tailwind` directive.
    #[error(transparent)]
    Directive(#[from] DirectiveError),
    /// A content file could not be read.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// `tack.toml` could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A rule body in `tack.toml` does not parse.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    /// A compiler invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CompileError {
    /// Converts the error into a diagnostic for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Parse(err) => err.to_diagnostic(),
            CompileError::Directive(err) => err.to_diagnostic(),
            CompileError::Extract(err) => err.to_diagnostic(),
            CompileError::Config(err) => {
                Diagnostic::error(DiagnosticCode::INVALID_CONFIG, err.to_string(), Span::DUMMY)
            }
            CompileError::Resolver(err) => {
                Diagnostic::error(DiagnosticCode::INVALID_RULE_BODY, err.to_string(), Span::DUMMY)
            }
            CompileError::Internal(err) => {
                Diagnostic::error(DiagnosticCode::INTERNAL, err.to_string(), Span::DUMMY)
                    .with_note("this is a bug in tack; please report it")
            }
        }
    }
}
